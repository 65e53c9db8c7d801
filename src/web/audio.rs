// Short synthesized cues keyed by feedback severity.
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::game::Severity;

const CUE_SECONDS: f64 = 0.3;
// C5, E5, G5 arpeggio
const FANFARE_HZ: [f32; 3] = [523.25, 659.25, 783.99];
const BUZZ_HZ: f32 = 150.0;
const BEEP_HZ: f32 = 800.0;

/// Lazily opened audio context shared by every cue.
#[derive(Default)]
pub struct Sounds {
    ctx: Option<AudioContext>,
}

impl Sounds {
    /// Fire-and-forget; a browser without Web Audio just stays quiet.
    pub fn play(&mut self, severity: Severity) {
        if let Err(err) = self.try_play(severity) {
            log::debug!("audio unavailable: {err:?}");
        }
    }

    fn try_play(&mut self, severity: Severity) -> Result<(), JsValue> {
        if self.ctx.is_none() {
            self.ctx = Some(AudioContext::new()?);
        }
        let Some(ctx) = self.ctx.as_ref() else { return Ok(()) };
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let t = ctx.current_time();
        let freq = osc.frequency();
        match severity {
            Severity::Success => {
                for (i, hz) in FANFARE_HZ.iter().enumerate() {
                    freq.set_value_at_time(*hz, t + 0.1 * i as f64)?;
                }
            }
            Severity::Error => {
                freq.set_value_at_time(BUZZ_HZ, t)?;
                osc.set_type(OscillatorType::Sawtooth);
            }
            Severity::Normal | Severity::Warning => {
                freq.set_value_at_time(BEEP_HZ, t)?;
            }
        }

        let level = gain.gain();
        level.set_value_at_time(0.1, t)?;
        level.exponential_ramp_to_value_at_time(0.01, t + CUE_SECONDS)?;
        osc.start_with_when(t)?;
        osc.stop_with_when(t + CUE_SECONDS)?;
        Ok(())
    }
}
