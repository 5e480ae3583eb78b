//! Weather monitor panel state

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SAMPLE_PERIOD: Duration = Duration::from_secs(5);
pub const ALERT_PERIOD: Duration = Duration::from_secs(15);
pub const ALERT_PROBABILITY: f64 = 0.3;

const TEMPERATURE_STEP: f64 = 2.0;
const HUMIDITY_STEP: f64 = 10.0;
const WIND_STEP: f64 = 4.0;
const PRESSURE_STEP: f64 = 0.1;

pub const SEVERE_ALERT: &str = "Severe thunderstorm warning in effect. Seek immediate shelter. \
Avoid outdoor activities until conditions improve.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Sunny,
    PartlyCloudy,
    Rainy,
    Windy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Degrees Fahrenheit
    pub temperature: f64,
    /// Percent, always within [0, 100]
    pub humidity: f64,
    /// mph, never negative
    pub wind_speed: f64,
    /// Miles
    pub visibility: f64,
    /// inHg
    pub pressure: f64,
    pub condition: Condition,
}

impl Default for WeatherSample {
    fn default() -> Self {
        Self {
            temperature: 72.0,
            humidity: 65.0,
            wind_speed: 8.0,
            visibility: 10.0,
            pressure: 30.15,
            condition: Condition::PartlyCloudy,
        }
    }
}

/// Uniform delta in `[-span/2, span/2)`
fn jitter<R: Rng>(rng: &mut R, span: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * span
}

impl WeatherSample {
    /// Derive the next sample from this one by a bounded random walk
    pub fn perturb<R: Rng>(&self, rng: &mut R) -> Self {
        Self {
            temperature: self.temperature + jitter(rng, TEMPERATURE_STEP),
            humidity: (self.humidity + jitter(rng, HUMIDITY_STEP)).clamp(0.0, 100.0),
            wind_speed: (self.wind_speed + jitter(rng, WIND_STEP)).max(0.0),
            visibility: self.visibility,
            pressure: self.pressure + jitter(rng, PRESSURE_STEP),
            condition: self.condition,
        }
    }

    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut tips = Vec::new();
        if self.wind_speed > 15.0 {
            tips.push("High winds detected. Secure loose objects and avoid open areas.");
        }
        if self.temperature < 40.0 {
            tips.push("Cold temperature alert. Prevent hypothermia - stay dry and warm.");
        }
        if self.temperature > 90.0 {
            tips.push("High temperature alert. Stay hydrated and seek shade regularly.");
        }
        if self.visibility < 5.0 {
            tips.push("Low visibility conditions. Use lights and move slowly.");
        }
        tips
    }

    /// Naive 24h outlook in 6h slots
    pub fn forecast(&self) -> Vec<ForecastSlot> {
        (0..4)
            .map(|i| ForecastSlot {
                hour: i * 6,
                temperature: self.temperature - f64::from(i) * 2.0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    pub hour: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherState {
    pub sample: WeatherSample,
    pub alert: bool,
}

impl WeatherState {
    pub fn sample_tick<R: Rng>(&mut self, rng: &mut R) -> &WeatherSample {
        self.sample = self.sample.perturb(rng);
        &self.sample
    }

    pub fn alert_tick<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.alert = rng.gen_bool(ALERT_PROBABILITY);
        self.alert
    }

    pub fn alert_text(&self) -> Option<&'static str> {
        self.alert.then_some(SEVERE_ALERT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn perturbation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut weather = WeatherState::default();
        for _ in 0..5_000 {
            let before = weather.sample.clone();
            let after = weather.sample_tick(&mut rng).clone();
            assert!((0.0..=100.0).contains(&after.humidity));
            assert!(after.wind_speed >= 0.0);
            assert!((after.temperature - before.temperature).abs() <= TEMPERATURE_STEP / 2.0);
            assert!((after.pressure - before.pressure).abs() <= PRESSURE_STEP / 2.0);
        }
    }

    #[test]
    fn alert_rate_is_roughly_thirty_percent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut weather = WeatherState::default();
        let hits = (0..10_000).filter(|_| weather.alert_tick(&mut rng)).count();
        assert!((2_700..3_300).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn recommendations_follow_thresholds() {
        let sample = WeatherSample {
            temperature: 95.0,
            wind_speed: 20.0,
            visibility: 2.0,
            ..WeatherSample::default()
        };
        assert_eq!(sample.recommendations().len(), 3);
        assert!(WeatherSample::default().recommendations().is_empty());
    }

    #[test]
    fn forecast_drops_two_degrees_per_slot() {
        let forecast = WeatherSample::default().forecast();
        let temps: Vec<f64> = forecast.iter().map(|s| s.temperature).collect();
        assert_eq!(temps, vec![72.0, 70.0, 68.0, 66.0]);
        assert_eq!(forecast[3].hour, 18);
    }
}
