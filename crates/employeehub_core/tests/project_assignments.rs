use chrono::NaiveDate;
use employeehub_core::{
    DesiredAssignment, Directory, EmployeeHub, FixedClock, MemoryKeyValueStore, NewProject,
    RoleError,
};
use std::rc::Rc;

fn directory() -> Directory {
    let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());
    Directory::open(Rc::new(MemoryKeyValueStore::new()), Rc::new(clock)).unwrap()
}

fn member_ids(directory: &Directory, project_id: u32) -> Vec<u32> {
    directory
        .employees_for_project(project_id)
        .iter()
        .map(|employee| employee.id)
        .collect()
}

#[test]
fn reconcile_twice_is_idempotent() {
    let mut directory = directory();
    let desired = vec![
        DesiredAssignment::new(1, "Sponsor"),
        DesiredAssignment::new(4, "Developer"),
        DesiredAssignment::new(6, "Developer"),
    ];

    let first = directory.reconcile_assignments(2, &desired).unwrap();
    assert!(!first.is_noop());
    let after_first = directory.employees().to_vec();

    let second = directory.reconcile_assignments(2, &desired).unwrap();
    assert!(second.is_noop());
    assert_eq!(directory.employees(), after_first.as_slice());
    assert_eq!(member_ids(&directory, 2), vec![1, 4, 6]);
}

#[test]
fn reconcile_never_duplicates_project_assignments() {
    let mut directory = directory();
    directory
        .reconcile_assignments(
            1,
            &[
                DesiredAssignment::new(2, "Developer"),
                DesiredAssignment::new(2, "Tech Lead"),
                DesiredAssignment::new(5, "Business Analyst"),
            ],
        )
        .unwrap();

    for employee in directory.employees() {
        let on_project = employee
            .project_assignments
            .iter()
            .filter(|assignment| assignment.project_id == 1)
            .count();
        assert!(on_project <= 1, "employee {} duplicated", employee.id);
    }
    assert_eq!(member_ids(&directory, 1), vec![2, 5]);
}

#[test]
fn new_project_then_reconcile_members() {
    let mut directory = directory();
    let project = directory
        .add_project(NewProject {
            name: "Apollo".to_string(),
            description: "Data platform".to_string(),
        })
        .unwrap();
    assert_eq!(project.id, 4);

    directory
        .reconcile_assignments(project.id, &[DesiredAssignment::new(3, "Developer")])
        .unwrap();
    let james = directory.employee(3).unwrap();
    assert_eq!(james.project_assignments.len(), 3);
    assert_eq!(james.project_assignments[2].project_id, 4);
}

#[test]
fn delete_project_cascades_to_every_employee() {
    let mut directory = directory();
    assert!(directory.delete_project(1).unwrap());

    assert!(directory.project(1).is_none());
    assert!(directory
        .employees()
        .iter()
        .all(|employee| !employee.is_assigned_to(1)));
    assert_eq!(directory.employee(1).unwrap().project_assignments.len(), 1);
    assert!(!directory.delete_project(1).unwrap());
}

#[test]
fn role_in_use_sees_primary_and_project_roles() {
    let mut directory = directory();
    assert!(directory.is_role_in_use("Business Analyst"));
    assert!(!directory.is_role_in_use("Tech Lead"));

    directory.assign_employee_to_project(4, 3, "Tech Lead").unwrap();
    assert!(directory.is_role_in_use("Tech Lead"));

    assert!(directory.update_employee_role(4, "Architect").unwrap());
    assert!(directory.is_role_in_use("Architect"));
    assert!(!directory.update_employee_role(77, "Architect").unwrap());
}

#[test]
fn hub_refuses_to_delete_roles_in_use_without_cascading() {
    let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());
    let mut hub = EmployeeHub::open(Rc::new(MemoryKeyValueStore::new()), Rc::new(clock)).unwrap();
    hub.roles.add_role("QA").unwrap();
    hub.directory.update_employee_role(4, "QA").unwrap();

    assert!(matches!(hub.delete_role("QA"), Err(RoleError::RoleInUse(_))));

    hub.roles.add_role("Intern").unwrap();
    hub.roles.update_role("QA", "Quality").unwrap();
    assert_eq!(hub.directory.employee(4).unwrap().role, "QA");
    hub.delete_role("Intern").unwrap();
    assert!(!hub.roles.contains("Intern"));
}

#[test]
fn leaderboard_breaks_ties_by_directory_order() {
    let mut directory = directory();
    // Li Wei 95 -> 125 ties Alex Johnson, who comes first in the directory.
    directory.send_kudos(6, 4, 30, "tie").unwrap();
    let board: Vec<u32> = directory.leaderboard().iter().map(|e| e.id).collect();
    assert_eq!(board, vec![6, 2, 3, 5, 1]);
    assert!(board.len() <= employeehub_core::LEADERBOARD_SIZE);
}
