//! 音声・振動の合図を実際に鳴らす
//!
//! 読み上げは外部コマンド（espeak-ng など）を起動するだけで待たない。
//! 前の読み上げが続いていれば止めてから次を始める。
//! 振動は端末ベルで代用する。

use crate::config::Config;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use stock_check_common::{cue_for, OutcomeKind};

pub struct Announcer {
    speech: Option<(String, Vec<String>)>,
    bell: bool,
    speaking: Option<Child>,
}

impl Announcer {
    pub fn from_config(config: &Config, speech_enabled: bool) -> Self {
        Self {
            speech: if speech_enabled { config.speech_program() } else { None },
            bell: config.bell,
            speaking: None,
        }
    }

    /// 何も鳴らさない
    pub fn silent() -> Self {
        Self { speech: None, bell: false, speaking: None }
    }

    /// 結果の種類に対応する合図を鳴らす
    pub fn announce(&mut self, kind: OutcomeKind) {
        let cue = cue_for(kind);
        self.speak(cue.speech);
        if cue.vibrate.is_some() {
            self.ring();
        }
    }

    pub fn speak(&mut self, text: &str) {
        if self.speech.is_none() {
            return;
        }
        self.cancel();

        let Some((program, args)) = &self.speech else {
            return;
        };
        match Command::new(program)
            .args(args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.speaking = Some(child),
            Err(e) => tracing::warn!(program = %program, error = %e, "speech command failed to start"),
        }
    }

    /// 読み上げ中なら止める
    fn cancel(&mut self) {
        if let Some(mut child) = self.speaking.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }

    fn ring(&self) {
        if !self.bell {
            return;
        }
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

impl Drop for Announcer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_disabled_by_flag() {
        let config = Config {
            speech_command: Some("espeak-ng".into()),
            ..Default::default()
        };
        let announcer = Announcer::from_config(&config, false);
        assert!(announcer.speech.is_none());
    }

    #[test]
    fn test_missing_program_does_not_panic() {
        let config = Config {
            speech_command: Some("definitely-not-a-real-speech-binary".into()),
            bell: false,
            ..Default::default()
        };
        let mut announcer = Announcer::from_config(&config, true);
        announcer.announce(OutcomeKind::NotFound);
        assert!(announcer.speaking.is_none());
    }

    #[test]
    fn test_silent_announcer() {
        let mut announcer = Announcer::silent();
        announcer.announce(OutcomeKind::Success);
        announcer.announce(OutcomeKind::Duplicate);
        assert!(announcer.speaking.is_none());
    }
}
