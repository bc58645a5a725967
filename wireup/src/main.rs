use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use wireup::application;
use wireup::strategy::{
    DeclarativeWiring, DiscoveryWiring, DynamicWiring, StaticWiring, WiringStrategy,
};

#[derive(Parser)]
#[command(name = "wireup")]
#[command(about = "Wires a data provider and a calculator, then prints the computed result")]
struct Cli {
    /// How to wire the components
    #[arg(value_enum, default_value_t = StrategyKind::Dynamic)]
    strategy: StrategyKind,
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
enum StrategyKind {
    /// Construct components directly
    Static,
    /// Read type names from the descriptor file
    Dynamic,
    /// Select self-registered components by capability
    Discovery,
    /// Read named components from the context file
    Declarative,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut application =
        application::create_default().context("unable to load application config")?;

    let config = application.config();
    let strategy: Box<dyn WiringStrategy> = match cli.strategy {
        StrategyKind::Static => Box::new(StaticWiring),
        StrategyKind::Dynamic => Box::new(DynamicWiring::new(config.descriptor_file.clone())),
        StrategyKind::Discovery => Box::new(DiscoveryWiring),
        StrategyKind::Declarative => Box::new(DeclarativeWiring::new(config.context_file.clone())),
    };

    application
        .run(strategy.as_ref())
        .with_context(|| format!("{} failed", strategy.label()))?;

    Ok(())
}
