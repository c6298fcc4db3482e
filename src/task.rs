//! Task records for hyd.
//!
//! One tagged record shape covers both boards (planning and
//! maintenance). Field names in the persisted JSON stay camelCase so the
//! store document matches the dashboard layout it feeds.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Board a task belongs to. Boards are separate bounded views over one
/// shared store; listing and calendars operate on one board at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    Planning,
    Maintenance,
}

impl Board {
    pub fn parse(raw: &str) -> Result<Board> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(Board::Planning),
            "maintenance" => Ok(Board::Maintenance),
            other => Err(Error::InvalidArgument(format!(
                "unknown board '{other}' (expected planning or maintenance)"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Board::Planning => "planning",
            Board::Maintenance => "maintenance",
        }
    }
}

/// Intervention kind. Parsing accepts the synonym vocabularies both
/// dashboard views used (English and French spellings).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Inspection,
    Repair,
    Replacement,
    Maintenance,
    Cleaning,
    Emergency,
}

impl TaskKind {
    pub fn parse(raw: &str) -> Result<TaskKind> {
        match normalize(raw).as_str() {
            "inspection" => Ok(TaskKind::Inspection),
            "repair" | "reparation" => Ok(TaskKind::Repair),
            "replacement" | "remplacement" => Ok(TaskKind::Replacement),
            "maintenance" => Ok(TaskKind::Maintenance),
            "cleaning" | "nettoyage" => Ok(TaskKind::Cleaning),
            "emergency" | "urgence" => Ok(TaskKind::Emergency),
            other => Err(Error::InvalidArgument(format!(
                "unknown task kind '{other}'"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Inspection => "inspection",
            TaskKind::Repair => "repair",
            TaskKind::Replacement => "replacement",
            TaskKind::Maintenance => "maintenance",
            TaskKind::Cleaning => "cleaning",
            TaskKind::Emergency => "emergency",
        }
    }
}

/// Priority, ordered. The ordering is display-only (badge and dot
/// colors); scheduling never consults it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn parse(raw: &str) -> Result<Priority> {
        match normalize(raw).as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low, medium, high or urgent)"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Task status. Four progression states plus an absorbing `cancelled`
/// reachable from any non-completed state. Transitions are user-driven
/// edits; the only shortcut is completion (status -> completed,
/// progress -> 100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

/// Kanban column order. Cancelled has no column.
pub const KANBAN_STATUSES: [Status; 4] = [
    Status::Pending,
    Status::Assigned,
    Status::InProgress,
    Status::Completed,
];

impl Status {
    pub fn parse(raw: &str) -> Result<Status> {
        match normalize(raw).as_str() {
            "pending" => Ok(Status::Pending),
            "assigned" => Ok(Status::Assigned),
            "inprogress" | "in-progress" | "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "cancelled" | "canceled" => Ok(Status::Cancelled),
            other => Err(Error::InvalidArgument(format!(
                "unknown status '{other}' (expected pending, assigned, inProgress, completed or cancelled)"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Assigned => "assigned",
            Status::InProgress => "inProgress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One maintenance or planning record tied to a hydrant.
///
/// `title` is optional: maintenance tickets carry a short label,
/// planning entries never did. `progress` is present while the task is
/// in progress (or forced to 100 by the complete shortcut) and absent
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub board: Board,
    pub hydrant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub priority: Priority,
    pub status: Status,
    /// Responsible actor's display name; empty string means unassigned.
    pub assigned_to: String,
    pub location: String,
    pub scheduled_date: NaiveDate,
    pub estimated_duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub description: String,
}

impl Task {
    /// Short display label: the title when present, the kind otherwise.
    pub fn display_label(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.kind.label())
    }

    pub fn is_unassigned(&self) -> bool {
        self.assigned_to.is_empty()
    }
}

/// Parse a `YYYY-MM-DD` scheduled date.
pub fn parse_scheduled_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(format!("invalid date '{raw}' (expected YYYY-MM-DD)")))
}

/// The fixed default task list: seven planning entries and six
/// maintenance tickets for the region. Restored whenever the store is
/// missing, empty, unreadable, or explicitly reset.
pub const SEED_TASKS_JSON: &str = r#"[
  {
    "id": "TK001",
    "board": "planning",
    "hydrantId": "H-TNG-001",
    "type": "inspection",
    "priority": "medium",
    "status": "completed",
    "assignedTo": "Mohammed Salim",
    "location": "Avenue Mohammed VI, 90000 Tanger",
    "scheduledDate": "2025-07-06",
    "estimatedDuration": "1h30",
    "progress": 100,
    "description": "Inspection semestrielle - Vérification des paramètres"
  },
  {
    "id": "TK002",
    "board": "planning",
    "hydrantId": "H-TNG-002",
    "type": "repair",
    "priority": "high",
    "status": "inProgress",
    "assignedTo": "Rachid Moussaoui",
    "location": "Boulevard Moulay Rachid, 90000 Tanger",
    "scheduledDate": "2025-06-13",
    "estimatedDuration": "3h00",
    "progress": 45,
    "description": "Réparation de la valve principale suite à une baisse de pression"
  },
  {
    "id": "TK003",
    "board": "planning",
    "hydrantId": "H-TET-001",
    "type": "replacement",
    "priority": "high",
    "status": "assigned",
    "assignedTo": "Omar Alami",
    "location": "Avenue Hassan II, 93000 Tétouan",
    "scheduledDate": "2025-06-10",
    "estimatedDuration": "4h00",
    "description": "Remplacement complet de l'hydrant - Travaux à venir"
  },
  {
    "id": "TK004",
    "board": "planning",
    "hydrantId": "H-AHC-001",
    "type": "maintenance",
    "priority": "medium",
    "status": "assigned",
    "assignedTo": "Leila Fassi",
    "location": "Rue Mohammed V, 32000 Al Hoceima",
    "scheduledDate": "2025-09-10",
    "estimatedDuration": "2h00",
    "description": "Maintenance préventive programmée"
  },
  {
    "id": "TK005",
    "board": "planning",
    "hydrantId": "H-TET-002",
    "type": "cleaning",
    "priority": "medium",
    "status": "pending",
    "assignedTo": "",
    "location": "Avenue des FAR, 93000 Tétouan",
    "scheduledDate": "2025-10-12",
    "estimatedDuration": "2h00",
    "description": "Nettoyage complet à programmer"
  },
  {
    "id": "TK006",
    "board": "planning",
    "hydrantId": "H-TNG-001",
    "type": "inspection",
    "priority": "medium",
    "status": "pending",
    "assignedTo": "",
    "location": "Avenue Mohammed VI, 90000 Tanger",
    "scheduledDate": "2025-09-06",
    "estimatedDuration": "1h30",
    "description": "Prochaine inspection semestrielle planifiée"
  },
  {
    "id": "TK007",
    "board": "planning",
    "hydrantId": "H-TNG-002",
    "type": "inspection",
    "priority": "medium",
    "status": "pending",
    "assignedTo": "",
    "location": "Boulevard Moulay Rachid, 90000 Tanger",
    "scheduledDate": "2025-10-15",
    "estimatedDuration": "1h30",
    "description": "Prochaine inspection semestrielle planifiée"
  },
  {
    "id": "1",
    "board": "maintenance",
    "hydrantId": "H-TNG-042",
    "title": "Remplacement valve principale",
    "type": "replacement",
    "priority": "urgent",
    "status": "inProgress",
    "assignedTo": "Mohammed Salim",
    "location": "Avenue Mohammed VI, Tanger",
    "scheduledDate": "2023-06-15",
    "estimatedDuration": "4h",
    "progress": 65,
    "description": "Valve défectueuse détectée lors de l'inspection. Remplacement urgent nécessaire."
  },
  {
    "id": "2",
    "board": "maintenance",
    "hydrantId": "H-TET-003",
    "title": "Inspection annuelle",
    "type": "inspection",
    "priority": "medium",
    "status": "completed",
    "assignedTo": "Omar Alami",
    "location": "Boulevard Moulay Rachid, Tétouan",
    "scheduledDate": "2023-06-10",
    "estimatedDuration": "2h",
    "progress": 100,
    "description": "Contrôle de routine annuel selon les normes de sécurité."
  },
  {
    "id": "3",
    "board": "maintenance",
    "hydrantId": "H-TNG-005",
    "title": "Réparation fuite",
    "type": "repair",
    "priority": "high",
    "status": "pending",
    "assignedTo": "Rachid Moussaoui",
    "location": "Rue Al Andalous, Tanger",
    "scheduledDate": "2023-06-16",
    "estimatedDuration": "3h",
    "description": "Fuite détectée au niveau du raccordement principal."
  },
  {
    "id": "4",
    "board": "maintenance",
    "hydrantId": "H-AHC-003",
    "title": "Remplacement complet",
    "type": "replacement",
    "priority": "high",
    "status": "pending",
    "assignedTo": "Karim Idrissi",
    "location": "Place Al Massira, Al Hoceima",
    "scheduledDate": "2023-06-20",
    "estimatedDuration": "6h",
    "description": "Hydrant en fin de vie, remplacement complet nécessaire."
  },
  {
    "id": "5",
    "board": "maintenance",
    "hydrantId": "H-TNG-006",
    "title": "Maintenance préventive",
    "type": "maintenance",
    "priority": "low",
    "status": "completed",
    "assignedTo": "Leila Fassi",
    "location": "Quartier Administratif, Tanger",
    "scheduledDate": "2023-06-08",
    "estimatedDuration": "1h30",
    "progress": 100,
    "description": "Nettoyage et lubrification des mécanismes."
  },
  {
    "id": "6",
    "board": "maintenance",
    "hydrantId": "H-TET-004",
    "title": "Urgence - Accident véhicule",
    "type": "emergency",
    "priority": "urgent",
    "status": "inProgress",
    "assignedTo": "Sofia El Amrani",
    "location": "Avenue Hassan II, Tétouan",
    "scheduledDate": "2023-06-14",
    "estimatedDuration": "5h",
    "progress": 30,
    "description": "Hydrant endommagé suite à un accident de la circulation."
  }
]"#;

/// Materialize the seed set.
pub fn seed_tasks() -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(SEED_TASKS_JSON)?;
    Ok(tasks)
}

/// Dashboard counters over a task slice. Callers pass the role-gated
/// list so a technician's numbers cover only their own work.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub assigned: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub urgent: usize,
    /// Mean progress percentage; tasks without a progress count as 0.
    pub average_progress: f64,
    /// Distinct hydrants referenced by the slice.
    pub hydrants_serviced: usize,
}

pub fn compute_stats(tasks: &[Task]) -> TaskStats {
    let count_status =
        |status: Status| tasks.iter().filter(|task| task.status == status).count();

    let progress_sum: u32 = tasks
        .iter()
        .map(|task| u32::from(task.progress.unwrap_or(0)))
        .sum();
    let average_progress = if tasks.is_empty() {
        0.0
    } else {
        f64::from(progress_sum) / tasks.len() as f64
    };

    let hydrants: HashSet<&str> = tasks.iter().map(|task| task.hydrant_id.as_str()).collect();

    TaskStats {
        total: tasks.len(),
        pending: count_status(Status::Pending),
        assigned: count_status(Status::Assigned),
        in_progress: count_status(Status::InProgress),
        completed: count_status(Status::Completed),
        cancelled: count_status(Status::Cancelled),
        urgent: tasks
            .iter()
            .filter(|task| task.priority == Priority::Urgent)
            .count(),
        average_progress,
        hydrants_serviced: hydrants.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_holds_both_boards() {
        let tasks = seed_tasks().expect("seed parses");
        assert_eq!(tasks.len(), 13);
        assert_eq!(
            tasks.iter().filter(|t| t.board == Board::Planning).count(),
            7
        );
        assert_eq!(
            tasks
                .iter()
                .filter(|t| t.board == Board::Maintenance)
                .count(),
            6
        );

        let mut ids = HashSet::new();
        for task in &tasks {
            assert!(ids.insert(task.id.clone()), "duplicate id {}", task.id);
        }
    }

    #[test]
    fn seed_contains_the_reference_repair() {
        let tasks = seed_tasks().expect("seed parses");
        let tk002 = tasks.iter().find(|t| t.id == "TK002").expect("TK002");
        assert_eq!(tk002.status, Status::InProgress);
        assert_eq!(tk002.priority, Priority::High);
        assert_eq!(
            tk002.scheduled_date,
            NaiveDate::from_ymd_opt(2025, 6, 13).expect("date")
        );
        assert_eq!(tk002.progress, Some(45));
        assert!(tk002.title.is_none());
    }

    #[test]
    fn serde_layout_is_camel_case() {
        let tasks = seed_tasks().expect("seed parses");
        let json = serde_json::to_value(&tasks[1]).expect("to json");
        assert_eq!(json["hydrantId"], "H-TNG-002");
        assert_eq!(json["type"], "repair");
        assert_eq!(json["status"], "inProgress");
        assert_eq!(json["scheduledDate"], "2025-06-13");
        assert!(json.get("title").is_none());
    }

    #[test]
    fn status_parse_accepts_synonym_spellings() {
        for raw in ["inProgress", "in-progress", "in_progress", "INPROGRESS"] {
            assert_eq!(Status::parse(raw).expect(raw), Status::InProgress);
        }
        assert!(Status::parse("done").is_err());
    }

    #[test]
    fn kind_parse_accepts_both_vocabularies() {
        assert_eq!(TaskKind::parse("Réparation").expect("fr"), TaskKind::Repair);
        assert_eq!(TaskKind::parse("repair").expect("en"), TaskKind::Repair);
        assert_eq!(
            TaskKind::parse("Nettoyage").expect("fr"),
            TaskKind::Cleaning
        );
        assert!(TaskKind::parse("painting").is_err());
    }

    #[test]
    fn priority_ordering_is_low_to_urgent() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::Urgent);
    }

    #[test]
    fn stats_count_statuses_and_hydrants() {
        let tasks = seed_tasks().expect("seed parses");
        let maintenance: Vec<Task> = tasks
            .into_iter()
            .filter(|t| t.board == Board::Maintenance)
            .collect();
        let stats = compute_stats(&maintenance);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.cancelled, 0);
        assert_eq!(stats.urgent, 2);
        assert_eq!(stats.hydrants_serviced, 6);
        // 65 + 100 + 0 + 0 + 100 + 30 over six tasks
        assert!((stats.average_progress - 49.166).abs() < 0.01);
    }

    #[test]
    fn stats_over_empty_slice_are_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_progress, 0.0);
        assert_eq!(stats.hydrants_serviced, 0);
    }

    #[test]
    fn scheduled_date_rejects_bad_input() {
        assert!(parse_scheduled_date("2025-06-13").is_ok());
        assert!(parse_scheduled_date("13/06/2025").is_err());
        assert!(parse_scheduled_date("2025-13-01").is_err());
    }
}
