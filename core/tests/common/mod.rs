//! Shared fixture: a throwaway SQLite copy of the production tables.

#![allow(dead_code)]

use awreport_core::{
    config::{Credentials, Dialect},
    runner::connect,
    store::Database,
};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: &str = "
CREATE TABLE product (
    productid      INTEGER PRIMARY KEY,
    productmodelid INTEGER,
    standardcost   NUMERIC NOT NULL
);
CREATE TABLE productinventory (
    productid  INTEGER NOT NULL,
    locationid INTEGER NOT NULL,
    quantity   INTEGER NOT NULL
);
CREATE TABLE transactionhistory (
    transactionid   INTEGER PRIMARY KEY,
    productid       INTEGER NOT NULL,
    transactiondate TEXT NOT NULL,
    transactiontype TEXT NOT NULL,
    quantity        INTEGER NOT NULL,
    actualcost      NUMERIC NOT NULL
);
CREATE TABLE productlistpricehistory (
    productid INTEGER NOT NULL,
    startdate TEXT NOT NULL,
    listprice NUMERIC NOT NULL
);
";

pub struct Fixture {
    dir: TempDir,
    pub db_path: PathBuf,
    pub out_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("adventureworks.db");
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).expect("out dir");
        Connection::open(&db_path)
            .and_then(|c| c.execute_batch(SCHEMA))
            .expect("schema");
        Self {
            dir,
            db_path,
            out_dir,
        }
    }

    pub fn exec(&self, sql: &str) {
        Connection::open(&self.db_path)
            .and_then(|c| c.execute_batch(sql))
            .expect("seed");
    }

    pub fn credentials(&self) -> Credentials {
        let mut creds = Credentials::default();
        creds.insert("path", self.db_path.to_string_lossy());
        creds
    }

    pub fn database(&self) -> Database {
        connect(Dialect::Sqlite, &self.credentials()).expect("connect")
    }

    pub fn read_output(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.out_dir.join(file_name)).expect("output file")
    }

    pub fn root(&self) -> &std::path::Path {
        self.dir.path()
    }
}
