//! Mock data standing in for a backend on first run.

use crate::model::employee::{Employee, EmployeeRole, ProjectAssignment};
use crate::model::kudo::KudoTransaction;
use crate::model::project::Project;
use crate::model::reward::Reward;
use crate::model::task::{Task, TaskStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Roles that always exist in the catalog and cannot be renamed or removed.
pub const DEFAULT_ROLES: &[&str] = &["Developer", "Business Analyst", "Project Manager"];

pub fn default_roles() -> Vec<EmployeeRole> {
    DEFAULT_ROLES.iter().map(|role| (*role).to_string()).collect()
}

fn assignment(project_id: u32, role: &str) -> ProjectAssignment {
    ProjectAssignment {
        project_id,
        role: role.to_string(),
    }
}

fn employee(
    id: u32,
    name: &str,
    role: &str,
    kudos_received: u64,
    kudos_sent: u64,
    project_assignments: Vec<ProjectAssignment>,
) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        role: role.to_string(),
        avatar_url: format!("https://i.pravatar.cc/150?u={id}"),
        kudos_received,
        kudos_balance: 50,
        kudos_sent,
        project_assignments,
    }
}

pub fn employees() -> Vec<Employee> {
    vec![
        employee(
            1,
            "Alex Johnson",
            "Project Manager",
            125,
            35,
            vec![assignment(1, "Project Manager"), assignment(2, "Project Manager")],
        ),
        employee(2, "Maria Garcia", "Developer", 210, 80, vec![assignment(1, "Developer")]),
        employee(
            3,
            "James Smith",
            "Developer",
            180,
            120,
            vec![assignment(1, "Developer"), assignment(3, "Developer")],
        ),
        employee(4, "Li Wei", "Developer", 95, 40, vec![assignment(2, "Developer")]),
        employee(
            5,
            "Fatima Ahmed",
            "Business Analyst",
            150,
            60,
            vec![
                assignment(2, "Business Analyst"),
                assignment(3, "Business Analyst"),
            ],
        ),
        employee(6, "Chloe Dubois", "Developer", 300, 95, vec![assignment(3, "Developer")]),
    ]
}

pub fn projects() -> Vec<Project> {
    [
        (1, "Phoenix Initiative", "Next-gen e-commerce platform migration."),
        (2, "Project Titan", "AI-driven analytics dashboard for enterprise clients."),
        (3, "Odyssey Mobile App", "Cross-platform mobile application for user engagement."),
    ]
    .into_iter()
    .map(|(id, name, description)| Project {
        id,
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn rewards() -> Vec<Reward> {
    [
        (1, "Coffee Shop Voucher", "$10 voucher for your favorite coffee.", 50, "coffee"),
        (2, "Movie Tickets", "Two tickets for a movie of your choice.", 150, "movie"),
        (3, "Company Swag Pack", "T-shirt, mug, and stickers with company branding.", 250, "swag"),
        (4, "Online Course Subscription", "1-month subscription to a learning platform.", 400, "course"),
    ]
    .into_iter()
    .map(|(id, name, description, cost, image_seed)| Reward {
        id,
        name: name.to_string(),
        description: description.to_string(),
        cost,
        image_url: format!("https://picsum.photos/seed/{image_seed}/400/300"),
    })
    .collect()
}

/// Builds the initial feed from current employee snapshots, newest first.
///
/// Entries whose sender or recipient is missing from `employees` are skipped.
pub fn feed(employees: &[Employee], now: DateTime<Utc>) -> Vec<KudoTransaction> {
    let find = |id: u32| employees.iter().find(|employee| employee.id == id).cloned();
    [
        (2, 6, 20, "Amazing work on the latest feature!", 1),
        (3, 2, 15, "Thanks for helping me debug that issue.", 3),
        (5, 1, 10, "Great leadership in the team meeting.", 5),
    ]
    .into_iter()
    .filter_map(|(from, to, amount, message, hours_ago)| {
        Some((find(from)?, find(to)?, amount, message, hours_ago))
    })
    .zip(1..)
    .map(|((from, to, amount, message, hours_ago), id)| KudoTransaction {
        id,
        from,
        to,
        amount,
        message: message.to_string(),
        timestamp: now - Duration::hours(hours_ago),
    })
    .collect()
}

pub fn tasks(today: NaiveDate) -> Vec<Task> {
    [
        (1, "Prepare Q3 presentation", "Gather all project metrics and create slides.", 3, TaskStatus::InProgress),
        (2, "Review Titan project PRs", "Go through the open pull requests on GitHub.", 1, TaskStatus::ToDo),
        (3, "Deploy Odyssey App v1.2", "Final deployment to production servers.", -2, TaskStatus::Done),
    ]
    .into_iter()
    .map(|(id, title, description, due_in_days, status)| Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        due_date: today + Duration::days(due_in_days),
        status,
    })
    .collect()
}
