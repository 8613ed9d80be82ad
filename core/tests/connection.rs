//! Opening data sources and how failures surface.

mod common;

use awreport_core::{
    config::{load_credentials, Credentials, Dialect},
    error::{ConnectError, ReportError},
    reports::{discount_by_quarter, inventory_by_model},
    runner::{connect, ReportRunner},
};
use common::Fixture;

#[test]
fn missing_database_file_is_a_connect_error() {
    let fx = Fixture::new();
    let mut creds = Credentials::default();
    creds.insert("path", fx.root().join("nope.db").to_string_lossy());

    let err = connect(Dialect::Sqlite, &creds).err().expect("should fail");
    assert!(matches!(err, ConnectError::Sqlite(_)), "{err}");
}

#[test]
fn non_database_file_is_a_connect_error() {
    let fx = Fixture::new();
    let bogus = fx.root().join("notes.txt");
    std::fs::write(&bogus, "not a database\n".repeat(64)).unwrap();
    let mut creds = Credentials::default();
    creds.insert("path", bogus.to_string_lossy());

    assert!(connect(Dialect::Sqlite, &creds).is_err());
}

#[test]
fn missing_path_parameter_is_a_connect_error() {
    let err = connect(Dialect::Sqlite, &Credentials::default())
        .err()
        .expect("should fail");
    assert!(matches!(err, ConnectError::MissingParameter("path")));
}

#[test]
fn credentials_file_drives_connection() {
    let fx = Fixture::new();
    let ini = fx.root().join("database.ini");
    std::fs::write(
        &ini,
        format!(
            "[postgresql]\nhost = localhost\n\n[sqlite]\npath = {}\nschema = main\n",
            fx.db_path.display()
        ),
    )
    .unwrap();
    fx.exec(
        "INSERT INTO product VALUES (1, 4, 1);
         INSERT INTO productinventory VALUES (1, 1, 9);",
    );

    let creds = load_credentials(&ini.to_string_lossy(), Dialect::Sqlite.section_name()).unwrap();
    let db = connect(Dialect::Sqlite, &creds).unwrap();
    let mut runner = ReportRunner::standard(&fx.out_dir);
    runner.retain(&["inventory_by_product_model".to_string()]);
    runner.run(&db).unwrap();

    // `schema = main` qualifies table names as main.product etc.
    assert_eq!(
        fx.read_output(inventory_by_model::FILE_NAME),
        "productmodelid,quantity\n4,9\n"
    );
}

#[test]
fn query_failure_stops_the_run_after_earlier_reports() {
    let fx = Fixture::new();
    fx.exec("DROP TABLE transactionhistory;");
    let db = fx.database();

    let err = ReportRunner::standard(&fx.out_dir).run(&db).unwrap_err();
    assert!(matches!(err, ReportError::Database(_)), "{err}");
    // The two catalog reports ran before the discount report failed.
    assert!(fx.out_dir.join(inventory_by_model::FILE_NAME).exists());
    assert!(!fx.out_dir.join(discount_by_quarter::FILE_NAME).exists());
}

#[test]
fn failed_report_keeps_previous_output_file() {
    let fx = Fixture::new();
    let previous = "productid,multiitem,transactiondate,totaldiscount\n1,False,2023-03-31,2.0\n";
    std::fs::write(fx.out_dir.join(discount_by_quarter::FILE_NAME), previous).unwrap();
    fx.exec("DROP TABLE transactionhistory;");
    let db = fx.database();

    let err = ReportRunner::standard(&fx.out_dir).run(&db).unwrap_err();
    assert!(matches!(err, ReportError::Database(_)), "{err}");
    assert_eq!(fx.read_output(discount_by_quarter::FILE_NAME), previous);
}

#[test]
fn unexpected_column_type_is_reported() {
    let fx = Fixture::new();
    fx.exec(
        "INSERT INTO product VALUES (1, 'frame', 1);
         INSERT INTO productinventory VALUES (1, 1, 9);",
    );
    let db = fx.database();
    let mut runner = ReportRunner::standard(&fx.out_dir);
    runner.retain(&["inventory_by_product_model".to_string()]);

    let err = runner.run(&db).unwrap_err();
    assert!(
        matches!(err, ReportError::UnexpectedType { ref column, .. } if column == "productmodelid"),
        "{err}"
    );
}
