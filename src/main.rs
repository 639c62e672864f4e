use cpusim::core::execution::{
    run_replications, ConcurrencyMode, ReplicationPlan, ReplicationSummary,
};
use cpusim::{
    FcfsPolicy, RoundRobinPolicy, SchedulingPolicy, SimulationConfig, SimulationEngine,
    SimulationReport, WorkloadGenerator,
};

fn run_policy(
    config: &SimulationConfig,
    policy: Box<dyn SchedulingPolicy>,
) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let workload = WorkloadGenerator::new(
        config.effective_workload_seed(),
        config.mean_interarrival_time,
    );
    let mut engine = SimulationEngine::new(config.clone(), policy, Box::new(workload))?;
    Ok(engine.run())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str::<SimulationConfig>(&text)?
        }
        None => SimulationConfig::new()
            .with_seed(42)
            .with_cache(0.85, 3),
    };
    config.validate()?;

    println!("=== CPU Scheduling + Cache Simulation ===");
    println!(
        "Seeds: engine={}, workload={}; context switch cost={}, miss penalty={}",
        config.seed,
        config.effective_workload_seed(),
        config.context_switch_cost,
        config.cache_miss_penalty
    );
    println!();

    let quantum = config.time_quantum;
    let fcfs = run_policy(&config, Box::new(FcfsPolicy::new()))?;
    let round_robin = run_policy(&config, Box::new(RoundRobinPolicy::new(quantum)))?;

    for report in [&fcfs, &round_robin] {
        println!("{}", report);
        println!();
    }

    let plan = ReplicationPlan::new((1..=32).collect()).with_concurrency(ConcurrencyMode::Rayon);
    let fcfs_runs = run_replications(&config, &plan, || Box::new(FcfsPolicy::new()))?;
    let rr_runs = run_replications(&config, &plan, || Box::new(RoundRobinPolicy::new(quantum)))?;

    println!("=== Replications ===");
    println!("{}: {}", fcfs.policy_name, ReplicationSummary::from_reports(&fcfs_runs));
    println!(
        "{}: {}",
        round_robin.policy_name,
        ReplicationSummary::from_reports(&rr_runs)
    );

    Ok(())
}
