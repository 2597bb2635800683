use crate::{
    errors::ErrorCode,
    models::tweet::{MediaEntity, MediaKind, MediaSelection, MediaVariant, TweetMetadata},
};

/// Picks the single variant a tweet will be downloaded as.
///
/// Bitrate-bearing video variants win by highest bitrate, with ties going to the
/// earliest in source order. Without any, the first GIF (or bitrate-less video)
/// variant is used and reported at bitrate 0.
pub fn select_variant(metadata: &TweetMetadata) -> Result<MediaSelection, ErrorCode> {
    let entities: Vec<(&MediaEntity, MediaKind)> = metadata
        .media()
        .iter()
        .filter_map(|entity| MediaKind::from_media_type(&entity.media_type).map(|kind| (entity, kind)))
        .filter(|(entity, _)| !entity.variants().is_empty())
        .collect();

    if entities.is_empty() {
        return Err(ErrorCode::NoVideoOrGif);
    }

    let mut best: Option<(&MediaEntity, &MediaVariant, u64)> = None;
    for (entity, kind) in &entities {
        if *kind != MediaKind::Video {
            continue;
        }

        for variant in entity.variants() {
            let Some(bitrate) = variant.bitrate else {
                continue;
            };

            // strictly greater keeps the first of equal bitrates
            if best.map_or(true, |(_, _, current)| bitrate > current) {
                best = Some((*entity, variant, bitrate));
            }
        }
    }

    if let Some((entity, variant, _)) = best {
        return Ok(MediaSelection {
            variant: variant.clone(),
            kind: MediaKind::Video,
            duration_millis: entity.duration_millis(),
        });
    }

    let (entity, kind) = entities
        .iter()
        .find(|(_, kind)| *kind == MediaKind::Gif)
        .unwrap_or(&entities[0]);

    let mut variant = entity.variants()[0].clone();
    variant.bitrate = Some(0);

    Ok(MediaSelection {
        variant,
        kind: *kind,
        duration_millis: entity.duration_millis(),
    })
}
