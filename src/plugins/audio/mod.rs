//! Shot audio (render-only).
//!
//! The fire sequence emits `ShotCue` messages; this plugin spawns a one-shot
//! audio player per cue. With no clip loaded the cues are drained and
//! dropped, so a missing asset never breaks the sequence.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::plugins::weapon::messages::ShotCue;

#[derive(Resource, Default)]
pub struct ShotAudio {
    pub clip: Option<Handle<AudioSource>>,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ShotAudio>();
    app.add_systems(Startup, load_clips);
    app.add_systems(Update, play_shot_cues);
}

fn load_clips(mut audio: ResMut<ShotAudio>, assets: Res<AssetServer>) {
    audio.clip = Some(assets.load("audio/shot.ogg"));
}

fn play_shot_cues(
    mut commands: Commands,
    audio: Res<ShotAudio>,
    mut cues: MessageReader<ShotCue>,
) {
    let Some(clip) = audio.clip.as_ref() else {
        cues.clear();
        return;
    };

    for _ in cues.read() {
        commands.spawn((AudioPlayer::new(clip.clone()), PlaybackSettings::DESPAWN));
    }
}
