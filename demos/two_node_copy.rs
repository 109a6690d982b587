// Two binary nodes where B copies A every step. Run with
// `RUST_LOG=info cargo run --example two_node_copy`.
use infodyn::estimators::Estimator;
use infodyn::estimators::approaches::DiscreteEstimator;
use infodyn::network::{LinkQuantity, Network, NodeQuantity};
use infodyn::simulation::Properties;
use infodyn::{Model, Result, Simulation, SimulationConfig, StateSpace};
use rand::Rng;
use rand::rngs::StdRng;

struct TwoNodeCopy;

fn bit(rng: &mut StdRng) -> f64 {
    if rng.gen_bool(0.5) { 1.0 } else { 0.0 }
}

impl Model for TwoNodeCopy {
    fn name(&self) -> &str {
        "TwoNodeCopy"
    }

    fn set_topology(&self, network: &mut Network) -> Result<()> {
        network.set_nodes(&["A", "B"])?;
        network.add_link("A", "B")
    }

    fn init_state_space(&self, state: &mut StateSpace, rng: &mut StdRng) -> Result<()> {
        state.set("A", bit(rng));
        state.set("B", bit(rng));
        Ok(())
    }

    fn set_estimator(&self) -> Result<Estimator> {
        Ok(DiscreteEstimator::new(2)?.into())
    }

    fn dynamics_of_states(
        &self,
        state: &StateSpace,
        buffer: &mut StateSpace,
        rng: &mut StdRng,
    ) -> Result<()> {
        buffer.set("A", bit(rng));
        buffer.set("B", state.get("A")?);
        Ok(())
    }

    fn register_properties(&self, properties: &mut Properties) {
        properties.insert("Q".to_string(), 2.into());
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::temp_dir().join("infodyn_two_node_copy");
    let config = SimulationConfig {
        time_limit: 5,
        ensemble_size: 5000,
        save_directory: dir.join("results"),
        ensemble_directory: dir.join("ensembles"),
        seed: Some(2024),
        ..Default::default()
    };

    let mut sim = Simulation::new(TwoNodeCopy, config)?;
    sim.initialize()?;
    sim.generate_data()?;

    let network = sim.network();
    let link = network
        .link("A", "B")
        .ok_or_else(|| infodyn::InfoDynError::UnknownVariable("A-B".to_string()))?;
    println!("step | TE(A->B) | TE(B->A) | H0(A) | E(A) | E(B)");
    let e_a = network.e_values("A")?;
    let e_b = network.e_values("B")?;
    for step in 0..link.len() {
        let h0 = network
            .node("A")
            .and_then(|n| n.value(NodeQuantity::H0, step))
            .unwrap_or(f64::NAN);
        println!(
            "{:>4} | {:+.4} | {:+.4} | {:+.4} | {:+.4} | {:+.4}",
            sim.step_times()[step],
            link.value(LinkQuantity::Te2, step).unwrap_or(f64::NAN),
            link.value(LinkQuantity::Te1, step).unwrap_or(f64::NAN),
            h0,
            e_a.get(step).copied().unwrap_or(f64::NAN),
            e_b.get(step).copied().unwrap_or(f64::NAN),
        );
    }
    println!("Results written to {}", sim.results_directory().display());
    Ok(())
}
