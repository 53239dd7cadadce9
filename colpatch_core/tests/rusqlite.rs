#[cfg(feature = "rusqlite")]
mod rusqlite {
    use colpatch_core::config::{Config, ConfigDbType};
    use colpatch_core::error::Kind;
    use colpatch_core::rusqlite::{Connection, OpenFlags};
    use colpatch_core::{
        default_columns, ensure_columns, Column, ColumnInfo, ColumnOutcome, Patcher,
    };
    use tempfile::TempDir;

    fn users_db(dir: &TempDir, columns: &str) -> std::path::PathBuf {
        let path = dir.path().join("habits.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL{});
             INSERT INTO users (email) VALUES ('ada@example.com');",
            columns
        ))
        .unwrap();
        path
    }

    fn column_names(schema: &[ColumnInfo]) -> Vec<&str> {
        schema.iter().map(ColumnInfo::name).collect()
    }

    #[test]
    fn adds_missing_columns() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");

        let report = ensure_columns(&path, "users", &default_columns()).unwrap();

        assert_eq!(vec!["name", "avatar"], report.added_columns());
        assert_eq!(
            vec!["id", "email", "name", "avatar"],
            column_names(report.schema())
        );
        for info in &report.schema()[2..] {
            assert_eq!("TEXT", info.sql_type());
            assert!(!info.not_null());
            assert_eq!(None, info.default_value());
            assert_eq!(0, info.pk());
        }
    }

    #[test]
    fn existing_rows_get_null() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");

        ensure_columns(&path, "users", &default_columns()).unwrap();

        let conn = Connection::open(&path).unwrap();
        let (name, avatar): (Option<String>, Option<String>) = conn
            .query_row("SELECT name, avatar FROM users", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(None, name);
        assert_eq!(None, avatar);
    }

    #[test]
    fn second_run_reports_existing_columns() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");

        let first = ensure_columns(&path, "users", &default_columns()).unwrap();
        let second = ensure_columns(&path, "users", &default_columns()).unwrap();

        assert!(second.added_columns().is_empty());
        for report in second.outcomes() {
            match report.outcome() {
                ColumnOutcome::AlreadyExists(msg) => {
                    assert!(msg.contains("duplicate column name"))
                }
                _ => panic!("test failed"),
            }
        }
        assert_eq!(first.schema(), second.schema());
    }

    #[test]
    fn adds_only_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, ", name TEXT");

        let report = ensure_columns(&path, "users", &default_columns()).unwrap();

        assert_eq!(vec!["avatar"], report.added_columns());
        assert!(matches!(
            report.outcomes()[0].outcome(),
            ColumnOutcome::AlreadyExists(_)
        ));
        assert_eq!("err name duplicate column name: name", report.outcomes()[0].to_string());
        assert_eq!("added avatar", report.outcomes()[1].to_string());
    }

    #[test]
    fn schema_has_one_entry_per_column() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");

        let mut report = ensure_columns(&path, "users", &default_columns()).unwrap();
        for _ in 0..3 {
            report = ensure_columns(&path, "users", &default_columns()).unwrap();
        }

        let mut names = column_names(report.schema());
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(total, names.len());
        assert_eq!(4, total);
    }

    #[test]
    fn missing_database_is_fatal_and_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backend").join("habits.db");

        let err = ensure_columns(&path, "users", &default_columns()).unwrap_err();

        match err.kind() {
            Kind::Connection(msg, _) => assert_eq!("could not open database", msg),
            _ => panic!("test failed"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn missing_table_rejects_columns() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");

        let report = ensure_columns(&path, "members", &default_columns()).unwrap();

        for report in report.outcomes() {
            match report.outcome() {
                ColumnOutcome::Rejected(msg) => assert!(msg.contains("no such table")),
                _ => panic!("test failed"),
            }
        }
        assert!(report.schema().is_empty());
    }

    #[test]
    fn rejected_column_does_not_block_others() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");
        let columns = vec![
            Column::new("nickname", "TEXT NOT NULL"),
            Column::text("avatar"),
        ];

        let report = ensure_columns(&path, "users", &columns).unwrap();

        assert!(matches!(
            report.outcomes()[0].outcome(),
            ColumnOutcome::Rejected(_)
        ));
        assert_eq!(vec!["avatar"], report.added_columns());
        assert_eq!(
            vec!["id", "email", "avatar"],
            column_names(report.schema())
        );
    }

    #[test]
    fn patches_open_connection() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE accounts (id INTEGER PRIMARY KEY);")
            .unwrap();

        let patcher = Patcher::new(&[Column::new("avatar", "BLOB")]).set_table_name("accounts");
        let report = patcher.run(&mut conn).unwrap();

        assert_eq!(vec!["avatar"], report.added_columns());
        let schema = patcher.get_table_info(&mut conn).unwrap();
        assert_eq!("BLOB", schema[1].sql_type());
    }

    #[test]
    fn quotes_table_and_column_names() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE \"order\" (id INTEGER PRIMARY KEY);")
            .unwrap();

        let report = Patcher::new(&[Column::text("group")])
            .set_table_name("order")
            .run(&mut conn)
            .unwrap();

        assert_eq!(vec!["group"], report.added_columns());
        assert_eq!(vec!["id", "group"], column_names(report.schema()));
    }

    #[test]
    fn patches_from_config() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");
        let mut config =
            Config::new(ConfigDbType::Sqlite).set_db_path(path.to_str().unwrap());

        let report = Patcher::new(&default_columns())
            .run(&mut config)
            .unwrap();

        assert_eq!(vec!["name", "avatar"], report.added_columns());

        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('users') WHERE name IN ('name', 'avatar')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(2, count);
    }

    #[test]
    fn config_without_path_is_fatal() {
        let mut config = Config::new(ConfigDbType::Sqlite);
        let err = Patcher::new(&default_columns())
            .run(&mut config)
            .unwrap_err();
        assert!(matches!(err.kind(), Kind::ConfigError(_)));
    }

    #[test]
    fn empty_table_name_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = users_db(&dir, "");

        let err = ensure_columns(&path, "", &default_columns()).unwrap_err();

        match err.kind() {
            Kind::ConfigError(msg) => assert_eq!("table name must not be empty", msg),
            _ => panic!("test failed"),
        }
        assert!(err.report().is_none());

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM pragma_table_info('users')", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(2, count);
    }

    #[test]
    fn non_database_file_is_fatal_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let err = ensure_columns(&path, "users", &default_columns()).unwrap_err();

        match err.kind() {
            Kind::Connection(msg, source) => {
                assert_eq!("could not open database", msg);
                assert!(source.to_string().contains("not a database"));
            }
            _ => panic!("test failed"),
        }
        assert!(err.report().is_none());
        assert_eq!(vec![b'x'; 4096], std::fs::read(&path).unwrap());
    }

    #[test]
    fn type_with_constraints_is_not_parsed() {
        assert!(colpatch_core::parse_column_spec("name:TEXT NOT NULL DEFAULT 0").is_err());
    }
}
