//! Onboarding Tour
//!
//! This example walks a small onboarding flow through a registry.
//!
//! Key concepts:
//! - Conditions loaded from a JSON condition table
//! - Handlers that return teardowns
//! - Redefinition on every "render" without re-running side effects
//! - Lifecycle history and tracing output
//!
//! Run with: RUST_LOG=debug cargo run --example onboarding_tour

use conditional::config::ConditionTable;
use conditional::effects::{ConditionalRegistry, Handler, Teardown};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    SignedIn,
    OpenedEditor,
    TypedText,
    DismissedTour,
}

const CONDITIONS: &str = r#"{
    "welcome": { "done": ["signed_in"], "undone": ["dismissed_tour"] },
    "typing_hint": { "done": ["opened_editor"], "undone": ["typed_text", "dismissed_tour"] }
}"#;

fn init_log() {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn overlay(label: &'static str) -> Handler {
    Handler::new(move || {
        println!("  show {label}");
        Teardown::new(move || println!("  hide {label}"))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_log();
    println!("=== Onboarding Tour ===\n");

    let table: ConditionTable<Step> = ConditionTable::from_json(CONDITIONS)?;
    let registry = ConditionalRegistry::new();
    let welcome = overlay("welcome banner");
    let hint = overlay("typing hint");

    // A host would redeclare its conditionals on every render.
    let render = |registry: &ConditionalRegistry<Step>| -> Result<(), Box<dyn std::error::Error>> {
        registry.define_conditional(table.conditional("welcome", welcome.clone())?);
        registry.define_conditional(table.conditional("typing_hint", hint.clone())?);
        registry.reconcile();
        Ok(())
    };

    for step in [Step::SignedIn, Step::OpenedEditor, Step::TypedText, Step::DismissedTour] {
        println!("{step:?}");
        registry.do_action(step);
        render(&registry)?;
    }

    println!("\nHistory:");
    for record in registry.history().records() {
        println!("  {} {}", record.conditional, record.event);
    }

    Ok(())
}
