use bsm_pricing::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Black-Scholes-Merton basic usage example");

    // One year, in the money call on a non dividend paying stock
    let inputs = OptionInputs::without_dividend(100.0, 95.0, 1.0, 0.18, 0.05)?;
    println!("Created inputs: {:?}", inputs.parameters());

    let call = EuropeanOption::call(inputs.clone());
    let put = EuropeanOption::put(inputs);

    for option in [&call, &put] {
        println!("{option}");
        println!("  value: {:.3}", option.value());
        println!("  delta: {:.3}", option.delta());
        println!("  gamma: {:.3}", option.gamma());
        println!("  theta: {:.3}", option.theta());
        println!("  vega:  {:.3}", option.vega());
        println!("  rho:   {:.3}", option.rho());
    }

    // Scenario analysis builds new inputs rather than mutating existing ones
    for days in [365.0, 182.0, 91.0, 30.0] {
        let scenario = call.inputs().with_time_to_expiry(days / 365.0)?;
        let repriced = EuropeanOption::call(scenario);
        println!("{days:>5} days to expiry: call worth {:.3}", repriced.value());
    }

    // Invalid inputs are rejected up front
    match OptionInputs::without_dividend(100.0, 95.0, 1.0, 0.0, 0.05) {
        Ok(_) => println!("unexpectedly accepted zero volatility"),
        Err(e) => println!("Rejected: {e}"),
    }

    println!("{}", serde_json::to_string_pretty(&call.result())?);

    Ok(())
}
