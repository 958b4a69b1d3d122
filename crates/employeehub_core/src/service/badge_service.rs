//! Badge eligibility derived from directory counters.

use crate::model::badge::Badge;
use crate::model::employee::Employee;
use crate::model::Kudos;

/// Assignment count that earns `project-pro`.
pub const PROJECT_PRO_MIN_ASSIGNMENTS: usize = 3;
/// Received total that earns `top-contributor`.
pub const TOP_CONTRIBUTOR_MIN_RECEIVED: Kudos = 200;

const GIVER: Badge = Badge {
    id: "giver",
    name: "Generous Giver",
    description: "Sent the most kudos.",
    icon: "🎁",
};
const RECEIVER: Badge = Badge {
    id: "receiver",
    name: "Kudos Champion",
    description: "Received the most kudos.",
    icon: "🏆",
};
const PROJECT_PRO: Badge = Badge {
    id: "project-pro",
    name: "Project Pro",
    description: "Assigned to 3 or more projects.",
    icon: "🛠️",
};
const TOP_CONTRIBUTOR: Badge = Badge {
    id: "top-contributor",
    name: "Top Contributor",
    description: "Received over 200 kudos in total.",
    icon: "✨",
};

pub fn all_badges() -> [Badge; 4] {
    [GIVER, RECEIVER, PROJECT_PRO, TOP_CONTRIBUTOR]
}

/// Badges `employee` has earned relative to `all` employees.
///
/// Most-sent and most-received ties all earn the badge; zero never does.
pub fn badges_for_employee(employee: &Employee, all: &[Employee]) -> Vec<Badge> {
    let max_sent = all.iter().map(|e| e.kudos_sent).max().unwrap_or(0);
    let max_received = all.iter().map(|e| e.kudos_received).max().unwrap_or(0);

    let mut earned = Vec::new();
    if employee.kudos_sent > 0 && employee.kudos_sent == max_sent {
        earned.push(GIVER);
    }
    if employee.kudos_received > 0 && employee.kudos_received == max_received {
        earned.push(RECEIVER);
    }
    if employee.project_assignments.len() >= PROJECT_PRO_MIN_ASSIGNMENTS {
        earned.push(PROJECT_PRO);
    }
    if employee.kudos_received >= TOP_CONTRIBUTOR_MIN_RECEIVED {
        earned.push(TOP_CONTRIBUTOR);
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::{all_badges, badges_for_employee};
    use crate::seed;

    fn badge_ids(employee_id: u32) -> Vec<&'static str> {
        let employees = seed::employees();
        let employee = employees.iter().find(|e| e.id == employee_id).unwrap();
        badges_for_employee(employee, &employees)
            .into_iter()
            .map(|badge| badge.id)
            .collect()
    }

    #[test]
    fn seeded_leaders_earn_their_badges() {
        assert_eq!(badge_ids(6), vec!["receiver", "top-contributor"]);
        assert_eq!(badge_ids(3), vec!["giver"]);
        assert_eq!(badge_ids(2), vec!["top-contributor"]);
        assert!(badge_ids(4).is_empty());
    }

    #[test]
    fn earned_badges_come_from_the_catalog() {
        let catalog = all_badges();
        let employees = seed::employees();
        for employee in &employees {
            for badge in badges_for_employee(employee, &employees) {
                assert!(catalog.contains(&badge), "{} not in catalog", badge.id);
            }
        }
        let mut ids: Vec<_> = catalog.iter().map(|badge| badge.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
