//! Sample board used by `taskboard seed`.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::domain::TaskPayload;

struct Sample {
    title: &'static str,
    description: &'static str,
    status: &'static str,
    priority: &'static str,
    /// Due offset from now, in days
    due_in_days: i64,
    estimated_time: u32,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Complete project documentation",
        description: "Write comprehensive documentation for the AI Task Manager project including API endpoints, database schema, and user guide",
        status: "in_progress",
        priority: "high",
        due_in_days: 2,
        estimated_time: 180,
    },
    Sample {
        title: "Fix critical bug in authentication",
        description: "Resolve security vulnerability in user authentication system that allows unauthorized access",
        status: "todo",
        priority: "high",
        due_in_days: 1,
        estimated_time: 120,
    },
    Sample {
        title: "Deploy application to production",
        description: "Set up production environment, configure CI/CD pipeline, and deploy the application",
        status: "todo",
        priority: "high",
        due_in_days: 3,
        estimated_time: 240,
    },
    Sample {
        title: "Review and merge pull requests",
        description: "Review 5 pending pull requests from team members and merge approved changes",
        status: "in_progress",
        priority: "high",
        due_in_days: 0,
        estimated_time: 90,
    },
    Sample {
        title: "Implement user feedback features",
        description: "Add features requested by users including dark mode, export functionality, and custom filters",
        status: "todo",
        priority: "medium",
        due_in_days: 7,
        estimated_time: 300,
    },
    Sample {
        title: "Optimize database queries",
        description: "Analyze slow queries and optimize database performance for better response times",
        status: "todo",
        priority: "medium",
        due_in_days: 5,
        estimated_time: 150,
    },
    Sample {
        title: "Write unit tests",
        description: "Create comprehensive unit tests for all API endpoints and frontend components",
        status: "in_progress",
        priority: "medium",
        due_in_days: 4,
        estimated_time: 200,
    },
    Sample {
        title: "Update dependencies",
        description: "Update all packages to latest versions and fix any breaking changes",
        status: "todo",
        priority: "medium",
        due_in_days: 6,
        estimated_time: 120,
    },
    Sample {
        title: "Design new dashboard UI",
        description: "Create mockups and implement new analytics dashboard with improved visualizations",
        status: "todo",
        priority: "medium",
        due_in_days: 10,
        estimated_time: 240,
    },
    Sample {
        title: "Set up monitoring and logging",
        description: "Configure application monitoring, error tracking, and logging system",
        status: "in_progress",
        priority: "medium",
        due_in_days: 3,
        estimated_time: 180,
    },
    Sample {
        title: "Create API documentation",
        description: "Generate API documentation using Swagger/OpenAPI and publish to documentation site",
        status: "todo",
        priority: "medium",
        due_in_days: 8,
        estimated_time: 150,
    },
    Sample {
        title: "Refactor legacy code",
        description: "Clean up old code, improve code structure, and remove unused functions",
        status: "todo",
        priority: "low",
        due_in_days: 14,
        estimated_time: 180,
    },
    Sample {
        title: "Add keyboard shortcuts",
        description: "Implement keyboard shortcuts for common actions to improve user experience",
        status: "todo",
        priority: "low",
        due_in_days: 12,
        estimated_time: 90,
    },
    Sample {
        title: "Improve error messages",
        description: "Make error messages more user-friendly and provide helpful guidance",
        status: "done",
        priority: "low",
        due_in_days: -2,
        estimated_time: 60,
    },
    Sample {
        title: "Update README file",
        description: "Add installation instructions, configuration guide, and contribution guidelines to README",
        status: "done",
        priority: "low",
        due_in_days: -1,
        estimated_time: 45,
    },
    Sample {
        title: "Create tutorial videos",
        description: "Record video tutorials explaining how to use the application features",
        status: "todo",
        priority: "low",
        due_in_days: 15,
        estimated_time: 300,
    },
    Sample {
        title: "Organize team meeting",
        description: "Schedule and prepare agenda for next team meeting to discuss project progress",
        status: "todo",
        priority: "low",
        due_in_days: 5,
        estimated_time: 30,
    },
    Sample {
        title: "Backup database",
        description: "Create automated backup system for production database",
        status: "done",
        priority: "low",
        due_in_days: -3,
        estimated_time: 60,
    },
    Sample {
        title: "Review code comments",
        description: "Go through codebase and ensure all functions have proper documentation comments",
        status: "todo",
        priority: "low",
        due_in_days: 20,
        estimated_time: 120,
    },
];

/// Sample tasks with due dates relative to `now`.
pub fn sample_tasks(now: DateTime<Utc>) -> Vec<TaskPayload> {
    SAMPLES
        .iter()
        .map(|sample| {
            let due = now + Duration::days(sample.due_in_days);
            TaskPayload::default()
                .title(sample.title)
                .description(sample.description)
                .status(sample.status)
                .priority(sample.priority)
                .due_date(due.to_rfc3339_opts(SecondsFormat::Millis, true))
                .estimated_time(sample.estimated_time)
        })
        .collect()
}
