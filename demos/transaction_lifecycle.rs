//! Transaction Lifecycle
//!
//! This demo walks a transaction through its lifecycle and shows how an
//! illegal transition is refused.
//!
//! Key concepts:
//! - Transitions fix their own source and target states
//! - Preconditions run before any side effect
//! - A refused transition leaves the holder untouched
//! - Snapshots capture a holder's lifecycle
//!
//! Run with: RUST_LOG=debug cargo run --example transaction_lifecycle

use statekeeper::checkpoint::Snapshot;
use statekeeper::domains::transaction::{
    Transaction, TransactionStateMachine, TransactionTransition,
};
use statekeeper::machine::{Holder, StateMachine};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Transaction Lifecycle Demo ===\n");

    let machine = TransactionStateMachine::new();
    let mut trx = Transaction::new();
    println!("Created {} in state '{}'", trx.describe(), trx.state());

    // A transition built without its account number is refused.
    let incomplete = TransactionTransition::Assign { account_no: None };
    if let Err(e) = machine.execute(&mut trx, &incomplete) {
        error!(error = %e, "Assignment refused");
        println!("Refused: {e}");
    }

    machine.execute(&mut trx, &TransactionTransition::assign("AC-100"))?;
    println!("After assign: '{}'", trx.state());

    // Assigning twice is not legal from `assigned`.
    if let Err(e) = machine.execute(&mut trx, &TransactionTransition::assign("AC-200")) {
        println!("Refused: {e}");
    }
    println!("Still: '{}'", trx.state());

    for transition in [
        TransactionTransition::Send,
        TransactionTransition::Export,
        TransactionTransition::Process,
    ] {
        machine.execute(&mut trx, &transition)?;
        println!("After {}: '{}'", transition.edge().name(), trx.state());
    }

    let path: Vec<String> = trx
        .lifecycle()
        .history()
        .get_path()
        .iter()
        .map(|state| state.to_string())
        .collect();
    println!("\nPath: {}", path.join(" -> "));

    let json = Snapshot::capture(&trx).to_json()?;
    info!(bytes = json.len(), "Snapshot taken");
    println!("Snapshot: {json}");

    println!("\n=== Demo Complete ===");
    Ok(())
}
