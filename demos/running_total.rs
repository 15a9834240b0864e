//! Running Total Calculator
//!
//! This example drives the engine the way a button front end would.
//!
//! Key concepts:
//! - One engine call per key, rendering the returned display
//! - Left-to-right folding with no operator precedence
//! - Division by zero shows "Error" and a new digit recovers
//! - Phase history as a diagnostic trace
//!
//! Run with: cargo run --example running_total

use tally::{parse_sequence, Action, CalculatorEngine, State};

fn press(engine: &mut CalculatorEngine, script: &str) {
    println!("Keys: {script}");
    for action in parse_sequence(script).expect("demo scripts use known keys") {
        let shown = action.dispatch(engine);
        println!("  {action:>3}  -> {shown}");
    }
    println!();
}

fn main() {
    println!("=== Running Total Calculator ===\n");

    let mut engine = CalculatorEngine::new();
    println!("Initial display: {}\n", engine.display());

    // 5 + 3 + 2 folds as it goes: the second + already shows 8.
    press(&mut engine, "5+3+2=");

    // No precedence: 2 + 3 * 4 is (2 + 3) * 4.
    press(&mut engine, "AC 2+3*4=");

    press(&mut engine, "AC 50%");
    press(&mut engine, "AC 12 ± + 20 =");

    press(&mut engine, "AC 5/0=");
    println!("Phase after division by zero: {}", engine.phase().name());
    Action::Digit('9').dispatch(&mut engine);
    println!("After typing 9: {} ({})\n", engine.display(), engine.phase().name());

    println!("Phase history:");
    for transition in engine.history().transitions() {
        println!(
            "  {:<13} -> {:<13} via {}",
            transition.from.name(),
            transition.to.name(),
            transition.operation
        );
    }

    println!("\n=== Example Complete ===");
}
