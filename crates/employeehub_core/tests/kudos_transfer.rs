use chrono::NaiveDate;
use employeehub_core::repo::json_store::{save_json, EMPLOYEES_KEY};
use employeehub_core::{
    seed, Clock, Directory, EmployeeHub, FixedClock, KeyValueStore, KudosError,
    MemoryKeyValueStore, RepoError, RepoResult,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Memory store whose writes to one chosen key fail.
#[derive(Default)]
struct FailingStore {
    inner: MemoryKeyValueStore,
    failing_key: RefCell<Option<String>>,
}

impl FailingStore {
    fn fail_writes_to(&self, key: &str) {
        *self.failing_key.borrow_mut() = Some(key.to_string());
    }

    fn heal(&self) {
        *self.failing_key.borrow_mut() = None;
    }

    fn check(&self, key: &str) -> RepoResult<()> {
        if self.failing_key.borrow().as_deref() == Some(key) {
            return Err(RepoError::InvalidData {
                key: key.to_string(),
                message: "disk full".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

fn open_failing() -> (Rc<FailingStore>, Directory) {
    let store = Rc::new(FailingStore::default());
    let clock = Rc::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
    ));
    let directory = Directory::open(store.clone(), clock).unwrap();
    (store, directory)
}

struct Fixture {
    store: Rc<MemoryKeyValueStore>,
    clock: Rc<FixedClock>,
    directory: Directory,
}

fn setup() -> Fixture {
    let store = Rc::new(MemoryKeyValueStore::new());
    let clock = Rc::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
    ));
    let directory = Directory::open(store.clone(), clock.clone()).unwrap();
    Fixture {
        store,
        clock,
        directory,
    }
}

fn counters(directory: &Directory, id: u32) -> (u64, u64, u64) {
    let employee = directory.employee(id).unwrap();
    (
        employee.kudos_balance,
        employee.kudos_sent,
        employee.kudos_received,
    )
}

#[test]
fn first_send_moves_counters_and_prepends_feed_without_bonus() {
    let mut fx = setup();
    let feed_before = fx.directory.feed().len();

    let receipt = fx.directory.send_kudos(1, 2, 20, "Great review").unwrap();

    assert_eq!(receipt.streak, 1);
    assert_eq!(receipt.bonus, 0);
    assert_eq!(counters(&fx.directory, 1), (30, 55, 125));
    assert_eq!(counters(&fx.directory, 2), (50, 80, 230));

    let feed = fx.directory.feed();
    assert_eq!(feed.len(), feed_before + 1);
    assert_eq!(feed[0].id, receipt.transaction.id);
    assert_eq!(feed[0].message, "Great review");
    assert_eq!(feed[0].from.kudos_balance, 50, "sender snapshot predates transfer");
    assert_eq!(feed[0].timestamp, fx.clock.now());
}

#[test]
fn declines_follow_check_order_and_leave_state_untouched() {
    let mut fx = setup();
    let before = fx.directory.employees().to_vec();
    let feed_len = fx.directory.feed().len();

    let missing = fx.directory.send_kudos(1, 99, 500, "").unwrap_err();
    assert!(matches!(missing, KudosError::RecipientNotFound(99)));

    let to_self = fx.directory.send_kudos(1, 1, 500, "").unwrap_err();
    assert!(matches!(to_self, KudosError::SelfTransferRejected));

    let unknown_sender = fx.directory.send_kudos(42, 1, 5, "").unwrap_err();
    assert!(matches!(unknown_sender, KudosError::SenderNotFound(42)));

    let broke = fx.directory.send_kudos(1, 2, 51, "").unwrap_err();
    assert!(matches!(
        broke,
        KudosError::InsufficientBalance {
            balance: 50,
            requested: 51
        }
    ));

    assert_eq!(fx.directory.employees(), before.as_slice());
    assert_eq!(fx.directory.feed().len(), feed_len);
    assert!(fx.store.get("user_1_kudo_streak").unwrap().is_none());
}

#[test]
fn consecutive_days_build_streak_and_third_day_earns_bonus() {
    let mut fx = setup();

    let day_one = fx.directory.send_kudos(1, 2, 5, "d1").unwrap();
    fx.clock.advance_days(1);
    let day_two = fx.directory.send_kudos(1, 3, 5, "d2").unwrap();
    fx.clock.advance_days(1);
    let day_three = fx.directory.send_kudos(1, 4, 20, "d3").unwrap();

    assert_eq!((day_one.streak, day_one.bonus), (1, 0));
    assert_eq!((day_two.streak, day_two.bonus), (2, 0));
    assert_eq!((day_three.streak, day_three.bonus), (3, 2));
    assert_eq!(
        day_three.message(),
        "Successfully sent 20 kudos! You got 2 kudos back for your 3-day streak! 🔥"
    );

    // 50 - 5 - 5 - 20 + 2
    assert_eq!(counters(&fx.directory, 1).0, 22);
    assert_eq!(
        fx.store.get("user_1_last_kudo_sent_date").unwrap().as_deref(),
        Some("2024-04-10")
    );
}

#[test]
fn streak_eligible_sender_gets_ten_percent_back() {
    let mut fx = setup();
    fx.store
        .set("user_1_last_kudo_sent_date", "2024-04-07")
        .unwrap();
    fx.store.set("user_1_kudo_streak", "2").unwrap();

    let receipt = fx.directory.send_kudos(1, 2, 20, "streak").unwrap();

    assert_eq!(receipt.streak, 3);
    assert_eq!(receipt.bonus, 2);
    assert_eq!(counters(&fx.directory, 1), (32, 55, 125));
    assert_eq!(counters(&fx.directory, 2).2, 230);
}

#[test]
fn same_day_sends_keep_streak_and_gap_resets_it() {
    let mut fx = setup();
    fx.store
        .set("user_3_last_kudo_sent_date", "2024-04-07")
        .unwrap();
    fx.store.set("user_3_kudo_streak", "4").unwrap();

    let first = fx.directory.send_kudos(3, 2, 10, "a").unwrap();
    let second = fx.directory.send_kudos(3, 2, 10, "b").unwrap();
    assert_eq!((first.streak, first.bonus), (5, 1));
    assert_eq!((second.streak, second.bonus), (5, 1));

    fx.clock.advance_days(2);
    let after_gap = fx.directory.send_kudos(3, 2, 10, "c").unwrap();
    assert_eq!((after_gap.streak, after_gap.bonus), (1, 0));
}

#[test]
fn hub_wraps_results_in_outcomes() {
    let store = Rc::new(MemoryKeyValueStore::new());
    let clock = Rc::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
    ));
    let mut hub = EmployeeHub::open(store, clock).unwrap();

    let ok = hub.send_kudos(1, 6, 10, "nice").unwrap();
    assert!(ok.success);
    assert_eq!(ok.message, "Successfully sent 10 kudos!");

    let declined = hub.send_kudos(1, 1, 10, "me").unwrap();
    assert!(!declined.success);
    assert_eq!(declined.message, "You cannot send kudos to yourself.");
}

#[test]
fn failed_employee_write_rolls_back_transfer_and_streak() {
    let (store, mut directory) = open_failing();
    let sender_before = counters(&directory, 1);
    let recipient_before = counters(&directory, 2);
    let feed_before = directory.feed().len();

    store.fail_writes_to(EMPLOYEES_KEY);
    let err = directory.send_kudos(1, 2, 20, "x").unwrap_err();

    assert!(matches!(err, KudosError::Repo(_)));
    assert_eq!(counters(&directory, 1), sender_before);
    assert_eq!(counters(&directory, 2), recipient_before);
    assert_eq!(directory.feed().len(), feed_before);
    assert!(store.get("user_1_kudo_streak").unwrap().is_none());
    assert!(store.get("user_1_last_kudo_sent_date").unwrap().is_none());

    store.heal();
    let receipt = directory.send_kudos(1, 2, 20, "x").unwrap();
    assert_eq!(receipt.streak, 1);
    assert_eq!(directory.feed().len(), feed_before + 1);
}

#[test]
fn failed_streak_write_leaves_directory_untouched() {
    let (store, mut directory) = open_failing();
    store.inner.set("user_1_last_kudo_sent_date", "2024-04-07").unwrap();
    store.inner.set("user_1_kudo_streak", "2").unwrap();
    let sender_before = counters(&directory, 1);

    store.fail_writes_to("user_1_kudo_streak");
    assert!(directory.send_kudos(1, 2, 20, "x").is_err());

    assert_eq!(counters(&directory, 1), sender_before);
    assert_eq!(
        store.get("user_1_last_kudo_sent_date").unwrap().as_deref(),
        Some("2024-04-07")
    );
    assert_eq!(
        store.get("user_1_kudo_streak").unwrap().as_deref(),
        Some("2")
    );
}

#[test]
fn counters_near_the_limit_saturate_instead_of_overflowing() {
    let store = Rc::new(MemoryKeyValueStore::new());
    let mut employees = seed::employees();
    employees[0].kudos_sent = u64::MAX - 1;
    employees[1].kudos_received = u64::MAX;
    save_json(store.as_ref(), EMPLOYEES_KEY, &employees).unwrap();
    let clock = Rc::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
    ));
    let mut directory = Directory::open(store, clock).unwrap();

    directory.send_kudos(1, 2, 20, "x").unwrap();

    assert_eq!(directory.employee(1).unwrap().kudos_sent, u64::MAX);
    assert_eq!(directory.employee(2).unwrap().kudos_received, u64::MAX);
    assert_eq!(directory.employee(1).unwrap().kudos_balance, 30);
}
