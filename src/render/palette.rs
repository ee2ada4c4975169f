use rand::Rng;

use crate::core::Gender;
use crate::render::Color;

/// Fixed color for the national aggregate series, by gender.
#[must_use]
pub fn gender_color(gender: Gender) -> Color {
    match gender {
        Gender::Female => Color::rgb(0.890, 0.467, 0.761),
        Gender::Male => Color::rgb(0.122, 0.467, 0.706),
        Gender::All => Color::rgb(0.580, 0.404, 0.741),
    }
}

/// Minimum per-channel distance a fresh state color should keep from the
/// colors already on screen.
const MIN_CHANNEL_DISTANCE: f64 = 0.15;
const CANDIDATE_ATTEMPTS: usize = 12;

/// Picks a random color for a state overlay.
///
/// Best-effort distinguishability: candidates too close to any active color
/// are rejected for a bounded number of attempts, after which the last
/// candidate is accepted. Uniqueness across active regions is not
/// guaranteed.
#[must_use]
pub fn random_state_color<R: Rng + ?Sized>(rng: &mut R, active: &[Color]) -> Color {
    let mut candidate = random_color(rng);
    for _ in 0..CANDIDATE_ATTEMPTS {
        let distinguishable = active
            .iter()
            .all(|existing| candidate.channel_distance(*existing) >= MIN_CHANNEL_DISTANCE);
        if distinguishable {
            break;
        }
        candidate = random_color(rng);
    }
    candidate
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    // Mid-saturation HSL band keeps overlays readable on a light surface.
    let hue = rng.random_range(0.0..360.0);
    let saturation = rng.random_range(0.55..0.85);
    let lightness = rng.random_range(0.35..0.55);
    hsl_to_rgb(hue, saturation, lightness)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = hue / 60.0;
    let x = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hue_prime as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    Color::rgb(r1 + m, g1 + m, b1 + m)
}
