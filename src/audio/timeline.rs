use std::path::PathBuf;

use crate::{
    document::{
        reference::{AssetCategory, AssetReference},
        xml::XmlElement,
    },
    foundation::{config::CodecConfig, error::MoviepackResult},
    storage::repository::AssetRepository,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fade ramp at one end of a clip.
pub struct Fade {
    /// Ramp length.
    pub duration: f64,
    /// Target volume.
    pub vol: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Playback instruction for one top-level `sound` element.
pub struct AudioTimelineEntry {
    /// Resolved on-disk location of the clip.
    pub filepath: PathBuf,
    /// Timeline start.
    pub start: f64,
    /// Timeline stop.
    pub stop: f64,
    /// Amount trimmed from the clip head.
    pub trim_start: f64,
    /// Amount trimmed from the clip tail.
    pub trim_end: f64,
    /// Fade-in ramp.
    pub fade_in: Fade,
    /// Fade-out ramp.
    pub fade_out: Fade,
}

/// Playback instructions for every top-level `sound` with an `sfile`, in document order.
///
/// Missing numeric fields read as `0`. Sounds without an `sfile` are skipped. User clips resolve
/// through `assets`, falling back to `user_content_root` for stores without file paths.
#[tracing::instrument(skip_all, fields(document_len = document.len()))]
pub fn extract_audio_times<A: AssetRepository>(
    config: &CodecConfig,
    assets: &A,
    document: &[u8],
) -> MoviepackResult<Vec<AudioTimelineEntry>> {
    let film = XmlElement::parse(document)?;
    let mut out = Vec::new();
    for sound in film.elements().filter(|e| e.name == "sound") {
        let Some(file) = sound.child_text("sfile") else {
            continue;
        };
        let reference = AssetReference::decode(&file, AssetCategory::Sound)?;
        let filepath = if reference.is_ugc() {
            let id = reference.ugc_id();
            assets
                .asset_path(&id)
                .unwrap_or_else(|| config.user_content_root.join(&id))
        } else {
            reference.theme_path(&config.shared_content_root)
        };

        out.push(AudioTimelineEntry {
            filepath,
            start: child_number(sound, "start"),
            stop: child_number(sound, "stop"),
            trim_start: child_number(sound, "trimStart"),
            trim_end: child_number(sound, "trimEnd"),
            fade_in: fade(sound, "fadein"),
            fade_out: fade(sound, "fadeout"),
        });
    }
    Ok(out)
}

fn child_number(sound: &XmlElement, name: &str) -> f64 {
    sound
        .child_text(name)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn fade(sound: &XmlElement, name: &str) -> Fade {
    let Some(el) = sound.child(name) else {
        return Fade::default();
    };
    let attr = |key: &str| {
        el.attr(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    };
    Fade {
        duration: attr("duration"),
        vol: attr("vol"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/timeline.rs"]
mod tests;
