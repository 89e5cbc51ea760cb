use serde_json::to_string_pretty;
use weft_blendtree_core::{BuildSession, Condition, Evaluator};

fn main() -> anyhow::Result<()> {
    let mut session = BuildSession::new();

    // Host-provided gesture weights.
    let left = session.well_known("GestureLeftWeight", 0.0);
    let right = session.well_known("GestureRightWeight", 0.0);

    // Average grip strength, then latch a lock flag once either hand
    // squeezes past 0.9 while the average is high.
    let grip = session.add(
        "GripStrength",
        &[(left.clone(), 0.5), (right.clone(), 0.5)],
        0.0,
    )?;
    let squeezing = Condition::greater_than(&left, 0.9, true)
        .or(Condition::greater_than(&right, 0.9, true));
    let engaged = squeezing.and(Condition::greater_than(&grip, 0.5, false));
    let locked = session.set_value_with_conditions(
        "FistLocked",
        &[
            (1.0, Some(engaged)),
            (0.0, Some(Condition::less_than(&grip, 0.1, false))),
        ],
    )?;

    // Retrofit a host-driven scale onto the lock without rebuilding it.
    let scale = session.well_known("LockScale", 1.0);
    session.multiply_in_place(&locked, &scale, None);

    let graph = session.finish();

    // Drive a couple of frames through the reference evaluator.
    let mut sim = Evaluator::new(&graph);
    sim.set("GestureLeftWeight", 1.0);
    sim.set("GestureRightWeight", 0.4);
    sim.step(&graph);
    println!(
        "grip={} locked={}",
        sim.get(&grip.name),
        sim.get(&locked.name)
    );

    println!("Frozen graph:\n{}", to_string_pretty(&graph)?);
    Ok(())
}
