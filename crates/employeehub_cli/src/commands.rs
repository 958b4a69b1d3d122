//! Subcommands and their console rendering.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use employeehub_core::{
    all_badges, badges_for_employee, ActionOutcome, DesiredAssignment, Employee, EmployeeHub,
    EmployeeId, Kudos, NewProject, NewTask, Project, ProjectId, RewardId, TaskId, TaskStatus,
};

#[derive(Subcommand)]
pub enum Command {
    /// List employees with their kudos counters
    Employees,
    /// Top employees by kudos received
    Leaderboard,
    /// Recent kudos, newest first
    Feed {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// List redeemable rewards
    Rewards,
    /// Send kudos from the acting user
    Send {
        to: EmployeeId,
        amount: Kudos,
        #[arg(default_value = "")]
        message: String,
    },
    /// Redeem a reward for the acting user
    Redeem { reward: RewardId },
    /// Badges earned by an employee (acting user by default)
    Badges {
        employee: Option<EmployeeId>,
        /// List the whole catalog and mark the earned ones
        #[arg(long)]
        all: bool,
    },
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Role(RoleCommand),
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    List,
    Add {
        name: String,
        #[arg(default_value = "")]
        description: String,
    },
    Update {
        id: ProjectId,
        name: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Delete a project and every assignment to it
    Delete { id: ProjectId },
    Assign {
        project: ProjectId,
        employee: EmployeeId,
        role: String,
    },
    Unassign {
        project: ProjectId,
        employee: EmployeeId,
    },
    /// Replace project membership with `employee=role` pairs
    Reconcile {
        project: ProjectId,
        members: Vec<String>,
    },
    Members { project: ProjectId },
}

#[derive(Subcommand)]
pub enum RoleCommand {
    List,
    Add { name: String },
    Rename { old: String, new: String },
    Delete { name: String },
    /// Set an employee's primary role
    Set { employee: EmployeeId, role: String },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    List,
    Add {
        title: String,
        /// YYYY-MM-DD
        due: NaiveDate,
        #[arg(default_value = "")]
        description: String,
    },
    Status { id: TaskId, status: String },
    Delete { id: TaskId },
}

pub fn run(hub: &mut EmployeeHub, acting_user: EmployeeId, command: Command) -> Result<()> {
    match command {
        Command::Employees => {
            for employee in hub.directory.employees() {
                print_employee(employee);
            }
        }
        Command::Leaderboard => {
            for (rank, employee) in hub.directory.leaderboard().iter().enumerate() {
                println!("{}. {} ({} kudos)", rank + 1, employee.name, employee.kudos_received);
            }
        }
        Command::Feed { limit } => {
            for kudo in hub.directory.feed().iter().take(limit) {
                println!(
                    "#{} {} -> {}: {} kudos \"{}\" at {}",
                    kudo.id,
                    kudo.from.name,
                    kudo.to.name,
                    kudo.amount,
                    kudo.message,
                    kudo.timestamp.to_rfc3339()
                );
            }
        }
        Command::Rewards => {
            for reward in hub.directory.rewards() {
                println!(
                    "{:>3} {:<28} {:>4} pts  {}",
                    reward.id, reward.name, reward.cost, reward.description
                );
            }
        }
        Command::Send {
            to,
            amount,
            message,
        } => report(hub.send_kudos(acting_user, to, amount, message)?)?,
        Command::Redeem { reward } => report(hub.redeem_reward(acting_user, reward)?)?,
        Command::Badges { employee, all } => {
            let id = employee.unwrap_or(acting_user);
            let target = hub
                .directory
                .employee(id)
                .ok_or_else(|| anyhow!("employee not found: {id}"))?;
            let earned = badges_for_employee(target, hub.directory.employees());
            if all {
                for badge in all_badges() {
                    let mark = if earned.contains(&badge) { "x" } else { " " };
                    println!(
                        "[{mark}] {} {} - {}",
                        badge.icon, badge.name, badge.description
                    );
                }
            } else {
                for badge in earned {
                    println!("{} {} - {}", badge.icon, badge.name, badge.description);
                }
            }
        }
        Command::Project(command) => run_project(hub, command)?,
        Command::Role(command) => run_role(hub, command)?,
        Command::Task(command) => run_task(hub, command)?,
    }
    Ok(())
}

fn run_project(hub: &mut EmployeeHub, command: ProjectCommand) -> Result<()> {
    let directory = &mut hub.directory;
    match command {
        ProjectCommand::List => {
            for project in directory.projects() {
                let members = directory.employees_for_project(project.id).len();
                println!(
                    "{:>3} {} ({members} members): {}",
                    project.id, project.name, project.description
                );
            }
        }
        ProjectCommand::Add { name, description } => {
            let project = directory.add_project(NewProject { name, description })?;
            println!("Created project {} \"{}\".", project.id, project.name);
        }
        ProjectCommand::Update {
            id,
            name,
            description,
        } => {
            if !directory.update_project(Project {
                id,
                name,
                description,
            })? {
                bail!("project not found: {id}");
            }
            println!("Updated project {id}.");
        }
        ProjectCommand::Delete { id } => {
            if !directory.delete_project(id)? {
                bail!("project not found: {id}");
            }
            println!("Deleted project {id}.");
        }
        ProjectCommand::Assign {
            project,
            employee,
            role,
        } => {
            ensure_project(directory.project(project).is_some(), project)?;
            if directory.assign_employee_to_project(employee, project, role)? {
                println!("Assigned employee {employee} to project {project}.");
            } else {
                println!("Employee {employee} is unknown or already on project {project}.");
            }
        }
        ProjectCommand::Unassign { project, employee } => {
            if directory.unassign_employee_from_project(employee, project)? {
                println!("Removed employee {employee} from project {project}.");
            } else {
                println!("Employee {employee} is not on project {project}.");
            }
        }
        ProjectCommand::Reconcile { project, members } => {
            ensure_project(directory.project(project).is_some(), project)?;
            let desired = members
                .iter()
                .map(|member| parse_member(member))
                .collect::<Result<Vec<_>>>()?;
            let stats = directory.reconcile_assignments(project, &desired)?;
            println!(
                "Project {project}: {} added, {} removed, {} role updates.",
                stats.added, stats.removed, stats.role_updated
            );
        }
        ProjectCommand::Members { project } => {
            for employee in directory.employees_for_project(project) {
                let role = employee
                    .assignment_for(project)
                    .map(|assignment| assignment.role.as_str())
                    .unwrap_or_default();
                println!("{:>3} {} ({role})", employee.id, employee.name);
            }
        }
    }
    Ok(())
}

fn run_role(hub: &mut EmployeeHub, command: RoleCommand) -> Result<()> {
    match command {
        RoleCommand::List => {
            for role in hub.roles.roles() {
                let in_use = if hub.directory.is_role_in_use(role) {
                    " (in use)"
                } else {
                    ""
                };
                println!("{role}{in_use}");
            }
        }
        RoleCommand::Add { name } => {
            let role = hub.roles.add_role(&name)?;
            println!("Role \"{role}\" added successfully.");
        }
        RoleCommand::Rename { old, new } => {
            hub.roles.update_role(&old, &new)?;
            println!("Role \"{old}\" renamed to \"{new}\".");
        }
        RoleCommand::Delete { name } => {
            hub.delete_role(&name)?;
            println!("Role \"{name}\" deleted.");
        }
        RoleCommand::Set { employee, role } => {
            if !hub.directory.update_employee_role(employee, role.as_str())? {
                bail!("employee not found: {employee}");
            }
            println!("Employee {employee}'s role has been updated to {role}.");
        }
    }
    Ok(())
}

fn run_task(hub: &mut EmployeeHub, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::List => {
            for task in hub.tasks.tasks() {
                println!(
                    "{} [{}] {} (due {})",
                    task.id,
                    task.status.as_str(),
                    task.title,
                    task.due_date
                );
            }
        }
        TaskCommand::Add {
            title,
            due,
            description,
        } => {
            let task = hub.tasks.add_task(NewTask {
                title,
                description,
                due_date: due,
            })?;
            println!("Created task {}.", task.id);
        }
        TaskCommand::Status { id, status } => {
            let status = TaskStatus::parse(&status)
                .with_context(|| format!("unknown task status `{status}`"))?;
            let task = hub.tasks.set_task_status(id, status)?;
            println!("Task {} is now {}.", task.id, task.status.as_str());
        }
        TaskCommand::Delete { id } => {
            hub.tasks.delete_task(id)?;
            println!("Deleted task {id}.");
        }
    }
    Ok(())
}

fn report(outcome: ActionOutcome) -> Result<()> {
    if outcome.success {
        println!("{}", outcome.message);
        Ok(())
    } else {
        Err(anyhow!(outcome.message))
    }
}

fn ensure_project(exists: bool, project: ProjectId) -> Result<()> {
    if exists {
        Ok(())
    } else {
        Err(anyhow!("project not found: {project}"))
    }
}

fn parse_member(member: &str) -> Result<DesiredAssignment> {
    let (employee, role) = member
        .split_once('=')
        .with_context(|| format!("expected `employee=role`, got `{member}`"))?;
    let employee_id = employee
        .trim()
        .parse::<EmployeeId>()
        .with_context(|| format!("invalid employee id in `{member}`"))?;
    Ok(DesiredAssignment::new(employee_id, role.trim()))
}

fn print_employee(employee: &Employee) {
    println!(
        "{:>3} {:<16} {:<18} balance={:<4} received={:<4} sent={:<4} projects={}",
        employee.id,
        employee.name,
        employee.role,
        employee.kudos_balance,
        employee.kudos_received,
        employee.kudos_sent,
        employee.project_assignments.len()
    );
}
