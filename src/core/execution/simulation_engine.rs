use crate::core::cache_model::CacheModel;
use crate::core::errors::SimulationError;
use crate::core::event::{Event, EventKind};
use crate::core::event_queue::EventQueue;
use crate::core::execution::config::SimulationConfig;
use crate::core::metrics::{MetricsCollector, SimulationReport};
use crate::core::scheduling::SchedulingPolicy;
use crate::core::types::{Process, ProcessId, ProcessState, Timestamp};
use crate::core::workload::Workload;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Observer trait for simulation events
pub trait SimulationObserver {
    /// Called when simulated time moves forward
    fn on_time_advance(&mut self, old_time: Timestamp, new_time: Timestamp);

    /// Called for every event, just before its handler runs
    fn on_event(&mut self, event: &Event);

    /// Called when a process is put on the CPU
    fn on_run_started(&mut self, _run: &RunSlice) {}
}

/// One contiguous stretch of CPU time granted to a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSlice {
    pub process: ProcessId,
    pub start: Timestamp,
    /// Useful work units; bounded by the policy's time slice
    pub planned_run: u64,
    /// Stall added by cache misses on top of `planned_run`
    pub cache_delay: u64,
}

impl RunSlice {
    pub fn end(&self) -> Timestamp {
        self.start + self.planned_run + self.cache_delay
    }
}

/// Discrete-event engine for a single simulated CPU
///
/// Owns every process for the lifetime of the run; events and the policy's
/// ready set refer to processes by [`ProcessId`].
pub struct SimulationEngine {
    config: SimulationConfig,
    policy: Box<dyn SchedulingPolicy>,
    workload: Box<dyn Workload>,
    /// Feeds memory-access and hit/miss draws only
    rng: StdRng,
    cache: CacheModel,
    metrics: MetricsCollector,
    events: EventQueue,
    processes: Vec<Process>,
    current_time: Timestamp,
    running: Option<ProcessId>,
    /// Set on the first start-run and never cleared
    cpu_has_run: bool,
    initialized: bool,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl SimulationEngine {
    /// Create an engine; the policy is fixed for the whole run
    pub fn new(
        config: SimulationConfig,
        policy: Box<dyn SchedulingPolicy>,
        workload: Box<dyn Workload>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            cache: CacheModel::new(config.cache_hit_probability, config.cache_miss_penalty),
            config,
            policy,
            workload,
            metrics: MetricsCollector::new(),
            events: EventQueue::new(),
            processes: Vec::new(),
            current_time: 0,
            running: None,
            cpu_has_run: false,
            initialized: false,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Run until the queue drains or the next event lies past the horizon
    pub fn run(&mut self) -> SimulationReport {
        info!(
            "Starting {} run: horizon={}, processes={}, seed={}",
            self.policy_name(),
            self.config.end_time,
            self.config.process_count_target,
            self.config.seed
        );

        while self.step() {}

        let report = self.report();
        info!(
            "Finished {} run at t={}: {} completed, {} context switches",
            report.policy_name, self.current_time, report.completed_processes, report.context_switches
        );
        report
    }

    /// Process one event, returns false once the run has halted
    pub fn step(&mut self) -> bool {
        if !self.initialized {
            self.initialize();
        }

        match self.events.peek_time() {
            Some(next_time) if next_time <= self.config.end_time => {}
            _ => return false,
        }
        let Some(event) = self.events.dequeue() else {
            return false;
        };

        if event.timestamp != self.current_time {
            let old_time = self.current_time;
            self.current_time = event.timestamp;
            for observer in &mut self.observers {
                observer.on_time_advance(old_time, self.current_time);
            }
        }

        debug!("{}", event);
        for observer in &mut self.observers {
            observer.on_event(&event);
        }

        match event.kind {
            EventKind::Arrival(pid) => self.on_arrival(pid),
            EventKind::Dispatch => self.on_dispatch(),
            EventKind::StartRun => self.on_start_run(),
            EventKind::SliceComplete(pid) => self.on_slice_complete(pid),
            EventKind::Complete(pid) => self.on_complete(pid),
        }

        true
    }

    /// Snapshot the metrics gathered so far
    pub fn report(&self) -> SimulationReport {
        self.metrics
            .build_report(&self.policy_name(), self.config.end_time)
    }

    pub fn policy_name(&self) -> String {
        if self.config.policy_name.is_empty() {
            self.policy.name()
        } else {
            self.config.policy_name.clone()
        }
    }

    /// Get current simulation time
    pub fn current_time(&self) -> Timestamp {
        self.current_time
    }

    /// Every process created so far, indexed by [`ProcessId`]
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.get(id.index())
    }

    pub fn running(&self) -> Option<ProcessId> {
        self.running
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn initialize(&mut self) {
        self.initialized = true;
        self.current_time = 0;
        self.schedule_next_arrival(0);
        self.events.enqueue(Event::new(0, EventKind::Dispatch));
    }

    fn schedule_next_arrival(&mut self, after: Timestamp) {
        if self.processes.len() >= self.config.process_count_target {
            return;
        }

        let gap = self.workload.next_interarrival_gap();
        let arrival_time = after.saturating_add(gap);
        let id = ProcessId::new(self.processes.len());

        let mut process = self.workload.create_process(id, arrival_time);
        process.id = id;
        trace!(
            "Created {} arriving at t={} (burst={}, mem_rate={:.3})",
            id,
            arrival_time,
            process.total_burst,
            process.memory_access_rate
        );
        self.processes.push(process);
        self.events
            .enqueue(Event::new(arrival_time, EventKind::Arrival(id)));
    }

    fn on_arrival(&mut self, pid: ProcessId) {
        let process = &mut self.processes[pid.index()];
        debug_assert_eq!(process.state, ProcessState::New);
        process.state = ProcessState::Ready;
        let arrival_time = process.arrival_time;
        self.policy.enqueue(pid);

        self.schedule_next_arrival(arrival_time);
        self.events
            .enqueue(Event::new(self.current_time, EventKind::Dispatch));
    }

    fn on_dispatch(&mut self) {
        if self.running.is_some() || !self.policy.has_ready() {
            return;
        }

        if self.cpu_has_run {
            self.metrics.record_context_switch();
        }

        let start = self.current_time + self.config.context_switch_cost;
        debug!("Dispatch at t={}, run starts at t={}", self.current_time, start);
        self.events.enqueue(Event::new(start, EventKind::StartRun));
    }

    fn on_start_run(&mut self) {
        if self.running.is_some() {
            return;
        }
        let Some(pid) = self.policy.dequeue() else {
            return;
        };

        self.running = Some(pid);
        self.cpu_has_run = true;
        let now = self.current_time;
        let slice = self.policy.time_slice();

        let process = &mut self.processes[pid.index()];
        debug_assert_eq!(process.state, ProcessState::Ready);
        process.state = ProcessState::Running;
        process.first_start_time.get_or_insert(now);
        process.quantum_remaining = slice;
        let planned_run = process.remaining_time.min(slice);
        let access_rate = process.memory_access_rate;

        let cache_delay = self.cache_delay_for_run(access_rate, planned_run);

        // Stall cycles count as busy; only the part inside the horizon is charged
        let occupied = planned_run + cache_delay;
        let within_horizon = self.config.end_time.saturating_sub(now);
        self.metrics.add_cpu_busy(occupied.min(within_horizon));

        let process = &mut self.processes[pid.index()];
        process.remaining_time -= planned_run;
        process.quantum_remaining -= planned_run;
        let finished = process.remaining_time == 0;

        let run = RunSlice {
            process: pid,
            start: now,
            planned_run,
            cache_delay,
        };
        debug!(
            "{} runs {} units (+{} stall) from t={}",
            pid, planned_run, cache_delay, now
        );
        for observer in &mut self.observers {
            observer.on_run_started(&run);
        }

        let kind = if finished {
            EventKind::Complete(pid)
        } else {
            EventKind::SliceComplete(pid)
        };
        self.events.enqueue(Event::new(run.end(), kind));
    }

    /// One access-check draw per unit, plus one hit/miss draw when it fires
    fn cache_delay_for_run(&mut self, access_rate: f64, units: u64) -> u64 {
        let mut delay = 0;

        for _ in 0..units {
            if self.rng.gen::<f64>() < access_rate {
                let hit = self.cache.is_hit(&mut self.rng);
                self.metrics.record_cache_access(hit);
                trace!("cache {}", if hit { "hit" } else { "miss" });

                if !hit {
                    delay += self.cache.miss_penalty();
                }
            }
        }

        delay
    }

    fn on_slice_complete(&mut self, pid: ProcessId) {
        let process = &mut self.processes[pid.index()];
        debug_assert_eq!(process.state, ProcessState::Running);
        process.state = ProcessState::Ready;
        self.running = None;

        self.policy.enqueue(pid);
        self.events
            .enqueue(Event::new(self.current_time, EventKind::Dispatch));
    }

    fn on_complete(&mut self, pid: ProcessId) {
        let process = &mut self.processes[pid.index()];
        debug_assert_eq!(process.state, ProcessState::Running);
        process.state = ProcessState::Terminated;
        process.finish_time = Some(self.current_time);
        self.metrics.record_completion(&self.processes[pid.index()]);
        debug!("{} completed at t={}", pid, self.current_time);

        self.running = None;
        self.events
            .enqueue(Event::new(self.current_time, EventKind::Dispatch));
    }
}
