use ld50_rs::data::DoseResponseData;
use ld50_rs::fit::fit;
use ld50_rs::model::ModelParams;
use ld50_rs::uncertainty::{Bootstrap, BootstrapConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("Bootstrap ED50 Interval Example");
    println!("===============================\n");

    // Simulate a study from a known curve
    let truth = ModelParams::new(2.0, 5.0);
    let doses = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let data = DoseResponseData::simulate(truth, &doses, 40, &mut rng)?;

    println!("dose   response/total");
    for obs in data.observations() {
        println!("{:<6} {}/{}", obs.dose, obs.response, obs.total);
    }

    let result = fit(&data)?;
    println!("\n{}", result);
    println!("True ED50: {}", truth.ed50);

    let bootstrap = Bootstrap::with_config(BootstrapConfig {
        iterations: 2000,
        ..BootstrapConfig::default()
    });
    let summary = bootstrap.run(&data, &mut rng)?;

    println!(
        "\nBootstrap: {} usable of {} trials",
        summary.successes(),
        summary.attempted
    );
    println!("95% percentile interval: {}", summary.interval);
    println!(
        "Contains true ED50: {}",
        summary.interval.contains(truth.ed50)
    );

    Ok(())
}
