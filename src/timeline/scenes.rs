use crate::types::{Scene, SceneAsset};

/// Shortest slot `max_scene_secs` may impose.
pub const MIN_SCENE_SECS: f64 = 0.001;
/// Residue below which the remaining time is folded into the last slot.
const SLOT_EPS_SECS: f64 = 1e-6;

/// Schedules background assets across `[0, duration_secs]`.
///
/// Assets get equal slots of `duration / assets.len()`, optionally capped at
/// `max_scene_secs`. When the capped slots do not cover the clip the asset
/// list is cycled from the start. The final slot always ends exactly at
/// `duration_secs`. With no assets a single placeholder scene spans the clip.
pub fn allocate_scenes(
    assets: &[String],
    duration_secs: f64,
    max_scene_secs: Option<f64>,
) -> Vec<Scene> {
    if !(duration_secs.is_finite() && duration_secs > 0.0) {
        tracing::warn!(duration_secs, "scenes: non-positive duration, nothing to allocate");
        return Vec::new();
    }

    if assets.is_empty() {
        tracing::info!(duration_secs, "scenes: no assets, using placeholder background");
        return vec![Scene {
            start_time: 0.0,
            end_time: duration_secs,
            asset: SceneAsset::Placeholder,
        }];
    }

    let baseline = duration_secs / assets.len() as f64;
    let slot = match max_scene_secs {
        Some(max) if max.is_finite() && max > 0.0 => baseline.min(max.max(MIN_SCENE_SECS)),
        _ => baseline,
    };

    let mut scenes = Vec::with_capacity((duration_secs / slot).ceil() as usize);
    let mut cursor = 0.0f64;
    for asset in assets.iter().cycle() {
        if duration_secs - cursor <= SLOT_EPS_SECS {
            break;
        }
        let end = if cursor + slot >= duration_secs - SLOT_EPS_SECS {
            duration_secs
        } else {
            cursor + slot
        };
        scenes.push(Scene {
            start_time: cursor,
            end_time: end,
            asset: SceneAsset::Image(asset.clone()),
        });
        cursor = end;
    }

    tracing::debug!(
        asset_count = assets.len(),
        scene_count = scenes.len(),
        slot_secs = format!("{slot:.3}"),
        duration_secs,
        "scenes: allocated background slots"
    );
    scenes
}

/// Index of the scene showing at `t`. Times past the end resolve to the last
/// scene, which is held to fill the remainder.
pub fn scene_index_at(scenes: &[Scene], t: f64) -> Option<usize> {
    if scenes.is_empty() || t < 0.0 {
        return None;
    }
    let idx = scenes.partition_point(|s| s.end_time <= t);
    Some(idx.min(scenes.len() - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img_{i}.png")).collect()
    }

    fn assert_covers(scenes: &[Scene], duration: f64) {
        assert!(!scenes.is_empty());
        assert_eq!(scenes[0].start_time, 0.0);
        for pair in scenes.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time, "scenes must be contiguous");
        }
        let total: f64 = scenes.iter().map(Scene::duration).sum();
        assert!((total - duration).abs() <= 1e-3, "total {total} != {duration}");
        assert_eq!(scenes.last().unwrap().end_time, duration);
        assert!(scenes.iter().all(|s| s.duration() > 0.0));
    }

    #[test]
    fn no_assets_yields_single_placeholder() {
        let scenes = allocate_scenes(&[], 10.0, None);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].start_time, 0.0);
        assert_eq!(scenes[0].end_time, 10.0);
        assert!(scenes[0].asset.is_placeholder());
    }

    #[test]
    fn assets_share_duration_evenly_in_order() {
        let scenes = allocate_scenes(&assets(3), 9.0, None);
        assert_eq!(scenes.len(), 3);
        for (i, scene) in scenes.iter().enumerate() {
            assert_eq!(scene.asset, SceneAsset::Image(format!("img_{i}.png")));
            assert!((scene.duration() - 3.0).abs() < 1e-9);
        }
        assert_covers(&scenes, 9.0);
    }

    #[test]
    fn awkward_division_still_covers_exactly() {
        for n in 1..=13 {
            for duration in [0.1, 1.0, 7.3, 10.0, 29.97, 30.0] {
                let scenes = allocate_scenes(&assets(n), duration, None);
                assert_eq!(scenes.len(), n);
                assert_covers(&scenes, duration);
            }
        }
    }

    #[test]
    fn capped_slots_cycle_and_shrink_final_slot() {
        let scenes = allocate_scenes(&assets(2), 10.0, Some(3.0));
        let uris: Vec<_> = scenes
            .iter()
            .map(|s| match &s.asset {
                SceneAsset::Image(uri) => uri.as_str(),
                SceneAsset::Placeholder => "placeholder",
            })
            .collect();
        assert_eq!(uris, vec!["img_0.png", "img_1.png", "img_0.png", "img_1.png"]);
        assert!((scenes[3].duration() - 1.0).abs() < 1e-9);
        assert_covers(&scenes, 10.0);
    }

    #[test]
    fn cap_larger_than_baseline_has_no_effect() {
        let scenes = allocate_scenes(&assets(4), 8.0, Some(5.0));
        assert_eq!(scenes.len(), 4);
        assert_covers(&scenes, 8.0);
    }

    #[test]
    fn tiny_scene_cap_is_floored() {
        let scenes = allocate_scenes(&assets(2), 0.01, Some(1e-9));
        assert_eq!(scenes.len(), 10);
        assert_covers(&scenes, 0.01);
    }

    #[test]
    fn non_positive_duration_allocates_nothing() {
        assert!(allocate_scenes(&assets(2), 0.0, None).is_empty());
        assert!(allocate_scenes(&[], -1.0, None).is_empty());
    }

    #[test]
    fn scene_lookup_holds_last_scene() {
        let scenes = allocate_scenes(&assets(2), 4.0, None);
        assert_eq!(scene_index_at(&scenes, 0.0), Some(0));
        assert_eq!(scene_index_at(&scenes, 1.99), Some(0));
        assert_eq!(scene_index_at(&scenes, 2.0), Some(1));
        assert_eq!(scene_index_at(&scenes, 4.0), Some(1));
        assert_eq!(scene_index_at(&scenes, 99.0), Some(1));
        assert_eq!(scene_index_at(&scenes, -0.1), None);
    }
}
