//! Task scheduler - runs recurring background jobs at a fixed rate
//!
//! All jobs share one driver loop, so at most one tick runs at a time and
//! none of them run on the inbound-message path.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::domain::traits::ScheduledTask;

/// Fixed set of jobs, assembled at startup
#[derive(Default)]
pub struct TaskScheduler {
    tasks: Vec<Box<dyn ScheduledTask>>,
}

struct Slot {
    task: Box<dyn ScheduledTask>,
    next_run: Instant,
    period: Duration,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T: ScheduledTask + 'static>(&mut self, task: T) {
        let schedule = task.schedule();
        tracing::info!(
            "Scheduled task '{}' every {:?} after {:?}",
            task.name(),
            schedule.period,
            schedule.initial_delay
        );
        self.tasks.push(Box::new(task));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Start the driver loop on the current runtime.
    ///
    /// Dropping the returned handle stops the scheduler as well.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown, shutdown_rx) = oneshot::channel();
        let driver = tokio::spawn(drive(self.tasks, shutdown_rx));
        SchedulerHandle { shutdown, driver }
    }
}

pub struct SchedulerHandle {
    shutdown: oneshot::Sender<()>,
    driver: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop scheduling. A tick already in progress is allowed to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.driver.await {
            tracing::error!("Scheduler driver ended abnormally: {}", e);
        }
    }
}

async fn drive(tasks: Vec<Box<dyn ScheduledTask>>, mut shutdown: oneshot::Receiver<()>) {
    let started = Instant::now();
    let mut slots: Vec<Slot> = tasks
        .into_iter()
        .map(|task| {
            let schedule = task.schedule();
            Slot {
                task,
                next_run: started + schedule.initial_delay,
                period: schedule.period,
            }
        })
        .collect();

    tracing::info!("Scheduler started with {} task(s)", slots.len());

    loop {
        let next = slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.next_run)
            .map(|(index, slot)| (index, slot.next_run));

        let Some((index, deadline)) = next else {
            tracing::warn!("No scheduled tasks left to run");
            let _ = shutdown.await;
            break;
        };

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep_until(deadline) => {}
        }

        let Slot { mut task, next_run, period } = slots.swap_remove(index);
        let name = task.name().to_string();

        // A panicking tick takes its task with it; the rest keep running
        let tick = tokio::spawn(async move {
            let result = task.run().await;
            (task, result)
        });

        match tick.await {
            Ok((task, result)) => {
                if let Err(e) = result {
                    tracing::error!("Scheduled task '{}' failed: {}", name, e);
                }
                slots.push(Slot {
                    task,
                    next_run: next_run + period,
                    period,
                });
            }
            Err(e) => {
                tracing::error!("Scheduled task '{}' aborted and will not run again: {}", name, e);
            }
        }
    }

    tracing::info!("Scheduler stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::{SourceError, TaskError};
    use crate::domain::traits::Schedule;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Records the time of each tick; fails or panics on chosen ticks
    struct Probe {
        name: &'static str,
        schedule: Schedule,
        started: Instant,
        ticks: Arc<Mutex<Vec<Duration>>>,
        fail_on: Option<usize>,
        panic_on: Option<usize>,
    }

    impl Probe {
        fn new(name: &'static str, delay_secs: u64, period_secs: u64) -> (Self, Arc<Mutex<Vec<Duration>>>) {
            let ticks = Arc::new(Mutex::new(Vec::new()));
            let probe = Self {
                name,
                schedule: Schedule::new(Duration::from_secs(delay_secs), Duration::from_secs(period_secs)),
                started: Instant::now(),
                ticks: ticks.clone(),
                fail_on: None,
                panic_on: None,
            };
            (probe, ticks)
        }
    }

    #[async_trait]
    impl ScheduledTask for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn schedule(&self) -> Schedule {
            self.schedule
        }

        async fn run(&mut self) -> Result<(), TaskError> {
            let tick = {
                let mut ticks = self.ticks.lock().unwrap();
                ticks.push(self.started.elapsed());
                ticks.len()
            };
            if self.panic_on == Some(tick) {
                panic!("probe '{}' blew up", self.name);
            }
            if self.fail_on == Some(tick) {
                return Err(SourceError::NoEntry(PathBuf::from("probe.log")).into());
            }
            Ok(())
        }
    }

    fn secs(ticks: &Arc<Mutex<Vec<Duration>>>) -> Vec<u64> {
        ticks.lock().unwrap().iter().map(|d| d.as_secs()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_after_delay_then_every_period() {
        let (probe, ticks) = Probe::new("np", 5, 2);
        let mut scheduler = TaskScheduler::new();
        scheduler.add(probe);
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(secs(&ticks).is_empty());

        tokio::time::sleep(Duration::from_millis(4_600)).await;
        assert_eq!(secs(&ticks), vec![5, 7, 9]);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failing_tick_does_not_stop_the_schedule() {
        let (mut probe, ticks) = Probe::new("flaky", 1, 1);
        probe.fail_on = Some(2);
        let mut scheduler = TaskScheduler::new();
        scheduler.add(probe);
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert_eq!(secs(&ticks), vec![1, 2, 3, 4]);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_task_is_retired_alone() {
        let (mut bad, bad_ticks) = Probe::new("bad", 1, 1);
        bad.panic_on = Some(2);
        let (good, good_ticks) = Probe::new("good", 1, 1);

        let mut scheduler = TaskScheduler::new();
        scheduler.add(bad);
        scheduler.add(good);
        assert_eq!(scheduler.len(), 2);
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        assert_eq!(secs(&bad_ticks), vec![1, 2]);
        assert_eq!(secs(&good_ticks), vec![1, 2, 3, 4, 5]);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_further_ticks() {
        let (probe, ticks) = Probe::new("np", 1, 1);
        let mut scheduler = TaskScheduler::new();
        scheduler.add(probe);
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        handle.shutdown().await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(secs(&ticks), vec![1, 2]);
    }
}
