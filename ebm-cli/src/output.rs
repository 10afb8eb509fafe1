//! Result writers for the sweep tool.

use clap::ValueEnum;
use ebm_core::geometry::LatitudeGeometry;
use ebm_core::sweep::StepResult;
use ebm_core::FloatValue;
use std::io::{self, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One summary row per step
    Csv,
    /// Full step results, including per-band temperatures and albedos
    Json,
}

pub fn write_results<W: Write>(
    writer: &mut W,
    format: Format,
    results: &[StepResult],
    geometry: &LatitudeGeometry,
    ice_albedo: FloatValue,
) -> io::Result<()> {
    match format {
        Format::Csv => write_csv(writer, results, geometry, ice_albedo),
        Format::Json => {
            serde_json::to_writer_pretty(&mut *writer, results)?;
            writeln!(writer)
        }
    }
}

fn write_csv<W: Write>(
    writer: &mut W,
    results: &[StepResult],
    geometry: &LatitudeGeometry,
    ice_albedo: FloatValue,
) -> io::Result<()> {
    writeln!(
        writer,
        "phase,delta,solar_multiplier,average_temperature,ice_fraction"
    )?;
    for result in results {
        let phase = if result.is_rising() { "rising" } else { "falling" };
        writeln!(
            writer,
            "{},{},{},{:.4},{:.4}",
            phase,
            result.delta,
            result.solar_multiplier,
            result.solution.average_temperature,
            result.solution.ice_fraction(geometry, ice_albedo)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebm_core::solver::Solution;

    fn example_results() -> Vec<StepResult> {
        vec![
            StepResult {
                delta: 0.5,
                solar_multiplier: 1.0,
                solution: Solution {
                    temperatures: vec![-40.0, -70.0],
                    albedos: vec![0.6, 0.6],
                    average_temperature: -50.0,
                },
            },
            StepResult {
                delta: -0.5,
                solar_multiplier: 1.5,
                solution: Solution {
                    temperatures: vec![20.0, -30.0],
                    albedos: vec![0.3, 0.3],
                    average_temperature: 5.25,
                },
            },
        ]
    }

    #[test]
    fn test_csv_output() {
        let geometry = LatitudeGeometry::new(2).unwrap();
        let mut buffer = Vec::new();
        write_results(&mut buffer, Format::Csv, &example_results(), &geometry, 0.6).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "phase,delta,solar_multiplier,average_temperature,ice_fraction"
        );
        assert_eq!(lines[1], "rising,0.5,1,-50.0000,1.0000");
        assert_eq!(lines[2], "falling,-0.5,1.5,5.2500,0.0000");
    }

    #[test]
    fn test_json_output() {
        let geometry = LatitudeGeometry::new(2).unwrap();
        let mut buffer = Vec::new();
        write_results(&mut buffer, Format::Json, &example_results(), &geometry, 0.6).unwrap();

        let parsed: Vec<StepResult> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, example_results());
    }
}
