//! Simulation configuration from CLI flags and environment.

use std::time::Duration;

use clap::Parser;

/// protopool — object pool simulation harness.
#[derive(Parser, Debug)]
#[command(name = "protopool", version, about)]
pub struct AppConfig {
    /// Number of templates to register, spread across all tiers.
    #[arg(long, default_value = "32", env = "PROTOPOOL_TEMPLATES")]
    pub templates: u32,

    /// Number of driver ticks to simulate.
    #[arg(long, default_value = "600")]
    pub ticks: u64,

    /// Simulated frame delta per tick (e.g. "16ms", "33ms").
    #[arg(long, default_value = "16ms")]
    pub frame_delta: String,

    /// Memory thresholds, ascending (e.g. "50M,100M,150M").
    #[arg(long, default_value = "50M,100M,150M")]
    pub thresholds: String,

    /// Interval between memory-pressure samples (e.g. "10s", "500ms").
    #[arg(long, default_value = "2s")]
    pub sample_interval: String,

    /// Simulated per-instance memory in MiB.
    #[arg(long, default_value = "0.75")]
    pub instance_mib: f64,

    /// Workload seed.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Print final statistics as JSON.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (suppress the summary).
    #[arg(short, long)]
    pub quiet: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the threshold list into ascending MiB values.
    pub fn thresholds_mib(&self) -> Result<[f64; 3], String> {
        let parts: Vec<&str> = self.thresholds.split(',').collect();
        if parts.len() != 3 {
            return Err(format!(
                "expected three comma-separated thresholds, got {:?}",
                self.thresholds
            ));
        }
        Ok([
            parse_memory_mib(parts[0])?,
            parse_memory_mib(parts[1])?,
            parse_memory_mib(parts[2])?,
        ])
    }

    /// Parse the per-tick frame delta.
    pub fn frame_delta_duration(&self) -> Result<Duration, String> {
        parse_duration(&self.frame_delta)
    }

    /// Parse the sampling interval.
    pub fn sample_interval_duration(&self) -> Result<Duration, String> {
        parse_duration(&self.sample_interval)
    }
}

/// Parse a memory size string (e.g. "2G", "150M", "512K") into MiB.
pub fn parse_memory_mib(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty memory size".to_string());
    }

    let (num_str, mib_multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024.0)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1.0 / 1024.0)
    } else {
        (s, 1.0)
    };

    let value: f64 = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory size: {e}"))?;
    Ok(value * mib_multiplier)
}

/// Parse a duration string like "10s", "500ms", "2m".
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins
            .parse()
            .map_err(|e| format!("invalid duration: {e}"))?;
        Ok(Duration::from_secs(n * 60))
    } else if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().map_err(|e| format!("invalid duration: {e}"))?;
        Ok(Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs
            .parse()
            .map_err(|e| format!("invalid duration: {e}"))?;
        Ok(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().map_err(|e| format!("invalid duration: {e}"))?;
        Ok(Duration::from_secs(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_memory_mib_units() {
        assert!((parse_memory_mib("2G").unwrap() - 2048.0).abs() < f64::EPSILON);
        assert!((parse_memory_mib("150M").unwrap() - 150.0).abs() < f64::EPSILON);
        assert!((parse_memory_mib("512K").unwrap() - 0.5).abs() < f64::EPSILON);
        assert!((parse_memory_mib("64").unwrap() - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_memory_mib_invalid() {
        assert!(parse_memory_mib("abc").is_err());
        assert!(parse_memory_mib("").is_err());
    }

    #[test]
    fn parse_duration_formats() {
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("10"), Ok(Duration::from_secs(10)));
    }

    #[test]
    fn parse_duration_invalid() {
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn thresholds_require_three_values() {
        let config = AppConfig {
            templates: 1,
            ticks: 1,
            frame_delta: "16ms".into(),
            thresholds: "50M,100M".into(),
            sample_interval: "2s".into(),
            instance_mib: 0.75,
            seed: 1,
            json: false,
            quiet: true,
        };
        assert!(config.thresholds_mib().is_err());
    }
}
