use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use super::{
    notification_models::{kind, CreateNotification},
    notification_service::NotificationService,
};
use crate::{store::StoreResult, task::task_repository::TaskRepository};

/// Records a `task_due` notification once per open task nearing its due date.
#[derive(Clone)]
pub struct ReminderJob {
    tasks: Arc<dyn TaskRepository>,
    notifications: NotificationService,
    window: Duration,
}

impl ReminderJob {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        notifications: NotificationService,
        window: Duration,
    ) -> Self {
        Self {
            tasks,
            notifications,
            window,
        }
    }

    /// One sweep. Returns how many reminders were recorded.
    ///
    /// Each task is claimed before its notification is written, so two sweeps
    /// never remind the same task. A claim whose notification fails is
    /// released and the task is retried on the next sweep. Per-task failures
    /// never abort the sweep; only the initial query is reported as an error.
    pub async fn run_once(&self, now: DateTime<Utc>) -> StoreResult<usize> {
        let due = self.tasks.find_due_for_reminder(now + self.window).await?;
        let mut sent = 0;

        for task in due {
            match self.tasks.claim_reminder(&task.id).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(task_id = %task.id, "Could not claim reminder: {}", e);
                    continue;
                }
            }

            let result = self
                .notifications
                .create_notification(CreateNotification {
                    user_id: task.responsible_user_id().to_string(),
                    message: format!("Reminder: \"{}\" is due soon", task.title),
                    kind: kind::TASK_DUE.to_string(),
                    project_id: Some(task.project_id.clone()),
                    task_id: Some(task.id.clone()),
                })
                .await;

            if let Err(e) = result {
                warn!(task_id = %task.id, "Reminder not recorded: {}", e);
                if let Err(e) = self.tasks.release_reminder(&task.id).await {
                    error!(task_id = %task.id, "Reminder claim left in place: {}", e);
                }
                continue;
            }

            sent += 1;
        }

        Ok(sent)
    }
}

pub async fn start_reminder_job(job: ReminderJob, schedule: &str) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new().await?;

    let cron = Job::new_async(schedule, move |_uuid, _l| {
        let job = job.clone();

        Box::pin(async move {
            match job.run_once(Utc::now()).await {
                Ok(0) => {}
                Ok(sent) => info!("Recorded {} due-date reminders", sent),
                Err(e) => error!("Error checking due tasks: {:?}", e),
            }
        })
    })?;

    scheduler.add(cron).await?;
    scheduler.start().await?;

    info!("Reminder job scheduled ({})", schedule);
    Ok(())
}
