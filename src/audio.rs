//! Audio system
//!
//! Sound files are loaded once through the asset provider and handed to a
//! platform [`AudioSink`] for playback. Missing sounds are silently skipped.

use crate::assets::{AssetProvider, Sound};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Answer was right
    Correct,
    /// Answer was wrong
    Wrong,
    /// Looping background music
    Music,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Correct, SoundEffect::Wrong, SoundEffect::Music];

    /// File name under `sounds/`
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Correct => "correct.wav",
            SoundEffect::Wrong => "wrong.wav",
            SoundEffect::Music => "ocean_music.wav",
        }
    }

    fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Music)
    }
}

/// Platform playback backend. Fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, sound: &Sound, volume: f32, looped: bool);
}

/// Discards everything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: &Sound, _volume: f32, _looped: bool) {}
}

/// Logs what would have played
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, sound: &Sound, volume: f32, looped: bool) {
        log::debug!(
            "play {} (volume {:.2}{})",
            sound.name,
            volume,
            if looped { ", looped" } else { "" }
        );
    }
}

/// Loaded sound handles; `None` where the file was missing
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    correct: Option<Sound>,
    wrong: Option<Sound>,
    music: Option<Sound>,
}

impl SoundBank {
    pub fn load(provider: &AssetProvider) -> Self {
        Self {
            correct: provider.load_sound(SoundEffect::Correct.file_name()),
            wrong: provider.load_sound(SoundEffect::Wrong.file_name()),
            music: provider.load_sound(SoundEffect::Music.file_name()),
        }
    }

    pub fn get(&self, effect: SoundEffect) -> Option<&Sound> {
        match effect {
            SoundEffect::Correct => self.correct.as_ref(),
            SoundEffect::Wrong => self.wrong.as_ref(),
            SoundEffect::Music => self.music.as_ref(),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    bank: SoundBank,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_started: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, bank: SoundBank) -> Self {
        Self {
            sink,
            bank,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_started: false,
        }
    }

    /// Pick up volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else if effect.is_music() {
            self.master_volume * self.music_volume
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        let Some(sound) = self.bank.get(effect) else {
            return;
        };
        self.sink.play(sound, vol, effect.is_music());
    }

    /// React to the events drained from the sim this frame
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::SessionStarted { .. } if !self.music_started => {
                    self.music_started = true;
                    self.play(SoundEffect::Music);
                }
                GameEvent::CorrectAnswer { .. } => self.play(SoundEffect::Correct),
                GameEvent::WrongAnswer { .. } => self.play(SoundEffect::Wrong),
                _ => {}
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingSink {
        played: Vec<(String, f32, bool)>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, sound: &Sound, volume: f32, looped: bool) {
            self.played.push((sound.name.clone(), volume, looped));
        }
    }

    fn sound(effect: SoundEffect) -> Option<Sound> {
        Some(Sound {
            name: effect.file_name().to_string(),
            path: PathBuf::from(effect.file_name()),
            bytes: Vec::new(),
        })
    }

    fn full_bank() -> SoundBank {
        SoundBank {
            correct: sound(SoundEffect::Correct),
            wrong: sound(SoundEffect::Wrong),
            music: sound(SoundEffect::Music),
        }
    }

    #[test]
    fn test_events_map_to_sounds() {
        let mut audio = AudioManager::new(RecordingSink::default(), full_bank());
        audio.handle_events(&[
            GameEvent::SessionStarted { seed: 1 },
            GameEvent::CorrectAnswer { creature: 0 },
            GameEvent::BubblePopped,
            GameEvent::WrongAnswer { creature: 0 },
            GameEvent::SessionStarted { seed: 2 },
        ]);
        let names: Vec<&str> = audio.sink().played.iter().map(|p| p.0.as_str()).collect();
        assert_eq!(names, ["ocean_music.wav", "correct.wav", "wrong.wav"]);
        assert!(audio.sink().played[0].2);
        assert!(!audio.sink().played[1].2);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new(RecordingSink::default(), full_bank());
        audio.apply_settings(&Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 1.0,
            ..Default::default()
        });
        audio.play(SoundEffect::Correct);
        audio.play(SoundEffect::Music);
        assert_eq!(audio.sink().played[0].1, 0.25);
        assert_eq!(audio.sink().played[1].1, 0.5);

        audio.set_muted(true);
        audio.play(SoundEffect::Wrong);
        assert_eq!(audio.sink().played.len(), 2);
    }

    #[test]
    fn test_missing_sound_is_noop() {
        let mut audio = AudioManager::new(RecordingSink::default(), SoundBank::default());
        audio.play(SoundEffect::Correct);
        assert!(audio.sink().played.is_empty());

        let bank = SoundBank::load(&AssetProvider::new("/nonexistent/assets"));
        assert!(SoundEffect::ALL.iter().all(|e| bank.get(*e).is_none()));
        let mut silent = AudioManager::new(NullSink, bank);
        silent.handle_events(&[GameEvent::SessionStarted { seed: 0 }]);
    }
}
