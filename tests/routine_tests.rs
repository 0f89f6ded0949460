use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_routine, init_db, rt, setup_test_db};

#[test]
fn test_init_prints_token_for_default_user() {
    let db_path = setup_test_db("init_token");

    rt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("User  : me"))
        .stdout(contains("Token : "));
}

#[test]
fn test_routines_listed_by_start_time() {
    let db_path = setup_test_db("routine_order");
    init_db(&db_path);

    add_routine(&db_path, "Dinner", "7:00 PM", "8:00 PM");
    add_routine(&db_path, "Wake up", "6:30 AM", "7:00 AM");
    add_routine(&db_path, "Lunch", "12:00 PM", "1:00 PM");

    let out = rt()
        .args(["--db", &db_path, "routine", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&out);

    let wake = out.find("Wake up").expect("Wake up listed");
    let lunch = out.find("Lunch").expect("Lunch listed");
    let dinner = out.find("Dinner").expect("Dinner listed");
    assert!(wake < lunch && lunch < dinner, "unexpected order:\n{out}");
}

#[test]
fn test_add_rejects_blank_name() {
    let db_path = setup_test_db("routine_blank");
    init_db(&db_path);

    rt().args([
        "--db", &db_path, "routine", "add", "  ", "--start", "8:00 AM", "--end", "9:00 AM",
    ])
    .assert()
    .failure()
    .stderr(contains("Missing required fields: task_name"));
}

#[test]
fn test_edit_and_delete_routine() {
    let db_path = setup_test_db("routine_edit_del");
    init_db(&db_path);
    add_routine(&db_path, "Gym", "12:00 PM", "2:00 PM");

    rt().args(["--db", &db_path, "routine", "edit", "1", "--start", "1:00 PM"])
        .assert()
        .success()
        .stdout(contains("'Gym' (1:00 PM - 2:00 PM)"));

    rt().args(["--db", &db_path, "routine", "del", "1"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    rt().args(["--db", &db_path, "routine", "del", "1"])
        .assert()
        .failure()
        .stderr(contains("Routine not found"));
}

#[test]
fn test_reset_restores_default_day() {
    let db_path = setup_test_db("routine_reset");
    init_db(&db_path);
    add_routine(&db_path, "Custom thing", "9:00 AM", "9:30 AM");

    rt().args(["--db", &db_path, "routine", "reset", "--yes"])
        .assert()
        .success()
        .stdout(contains("Restored 9 default routines"));

    rt().args(["--db", &db_path, "routine", "list"])
        .assert()
        .success()
        .stdout(contains("Sleep"))
        .stdout(contains("Morning & Breakfast"))
        .stdout(contains("Dinner & Rest"))
        .stdout(contains("Custom thing").not());
}

#[test]
fn test_other_user_cannot_delete_routine() {
    let db_path = setup_test_db("routine_owner");
    init_db(&db_path);
    add_routine(&db_path, "Gym", "12:00 PM", "2:00 PM");

    rt().args(["--db", &db_path, "user", "add", "bob"])
        .assert()
        .success()
        .stdout(contains("User 'bob' created"));

    rt().args(["--db", &db_path, "--user", "bob", "routine", "del", "1"])
        .assert()
        .failure()
        .stderr(contains("Routine belongs to another user"));

    rt().args(["--db", &db_path, "--user", "bob", "routine", "list"])
        .assert()
        .success()
        .stdout(contains("Gym").not());

    rt().args(["--db", &db_path, "routine", "list"])
        .assert()
        .success()
        .stdout(contains("Gym"));
}

#[test]
fn test_unknown_user_is_rejected() {
    let db_path = setup_test_db("routine_unknown_user");
    init_db(&db_path);

    rt().args(["--db", &db_path, "--user", "ghost", "routine", "list"])
        .assert()
        .failure()
        .stderr(contains("Unknown user: ghost"));
}

#[test]
fn test_schedule_by_day() {
    let db_path = setup_test_db("schedule_day");
    init_db(&db_path);
    add_routine(&db_path, "Swim", "7:00 AM", "8:00 AM");

    rt().args(["--db", &db_path, "schedule", "add", "1", "mon"])
        .assert()
        .success()
        .stdout(contains("'Swim' on Monday"));

    rt().args(["--db", &db_path, "schedule", "list", "--day", "1"])
        .assert()
        .success()
        .stdout(contains("Routine for Monday"))
        .stdout(contains("Swim"));

    rt().args(["--db", &db_path, "schedule", "list", "--day", "tue"])
        .assert()
        .success()
        .stdout(contains("Nothing scheduled"));

    rt().args(["--db", &db_path, "schedule", "add", "1", "9"])
        .assert()
        .failure()
        .stderr(contains("Invalid day of week: 9"));
}

#[test]
fn test_log_records_mutations() {
    let db_path = setup_test_db("log_print");
    init_db(&db_path);
    add_routine(&db_path, "Read", "9:00 PM", "10:00 PM");

    rt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("routine#1"))
        .stdout(contains("Read (9:00 PM - 10:00 PM)"));
}
