//! Prints the magnitude response of every filter in the bank.
//!
//! Useful for checking passband normalization and comparing how much
//! stopband attenuation the Hamming and Blackman windows buy.
//!
//! Usage:
//!   cargo run --example design_report

use anyhow::Result;
use firbank::{FilterBank, SAMPLE_RATE};

/// Frequencies in Hz at which the response is reported.
const PROBE_FREQUENCIES: [f64; 9] = [
    0.0, 500.0, 900.0, 1000.0, 1500.0, 2000.0, 2100.0, 3000.0, 4000.0,
];

fn to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.max(1e-12).log10()
}

fn main() -> Result<()> {
    env_logger::init();

    let bank = FilterBank::<SAMPLE_RATE>::design()?;
    let nyquist = bank.sample_rate() / 2.0;

    println!(
        "FIR filter bank: {} Hz sample rate, order {} ({} taps)",
        SAMPLE_RATE,
        bank.order(),
        bank.order() + 1
    );
    println!();

    print!("{:<14}", "Filter");
    for frequency in PROBE_FREQUENCIES {
        print!("{:>9}", format!("{} Hz", frequency));
    }
    println!();

    for (id, fir) in bank.iter() {
        print!("{:<14}", id.name());
        for frequency in PROBE_FREQUENCIES {
            let db = to_db(fir.frequency_response(frequency / nyquist));
            print!("{:>9.1}", db);
        }
        println!();
    }

    println!();
    println!("Band edges:");
    for (id, _) in bank.iter() {
        println!("  {:<14} {:?}", id.name(), bank.spec(id).band);
    }

    Ok(())
}
