//! Progress Ring Component
//!
//! Circular completion indicator with a "completed/total" caption.

use leptos::prelude::*;
use ringlist_core::Progress;

const RADIUS: f64 = 42.0;
const PATH_COLOR: &str = "cyan";
const TRAIL_COLOR: &str = "lightgray";
const TEXT_COLOR: &str = "black";

/// Length of the unfilled part of the ring's stroke
fn dash_offset(progress: &Progress, circumference: f64) -> f64 {
    circumference * (1.0 - progress.percent() / 100.0)
}

#[component]
pub fn ProgressRing(progress: Progress) -> impl IntoView {
    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    let dasharray = format!("{:.3} {:.3}", circumference, circumference);
    let dashoffset = format!("{:.3}", dash_offset(&progress, circumference));
    let radius = RADIUS.to_string();

    view! {
        <div class="progress-ring" style="width: 100px; height: 100px; margin: 10px auto;">
            <svg viewBox="0 0 100 100" width="100" height="100">
                <circle
                    cx="50"
                    cy="50"
                    r=radius.clone()
                    fill="none"
                    stroke=TRAIL_COLOR
                    stroke-width="8"
                />
                <circle
                    cx="50"
                    cy="50"
                    r=radius
                    fill="none"
                    stroke=PATH_COLOR
                    stroke-width="8"
                    stroke-linecap="round"
                    stroke-dasharray=dasharray
                    stroke-dashoffset=dashoffset
                    transform="rotate(-90 50 50)"
                />
                <text
                    x="50"
                    y="50"
                    text-anchor="middle"
                    dominant-baseline="central"
                    fill=TEXT_COLOR
                >
                    {progress.label()}
                </text>
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_offset_tracks_percent() {
        let c = 100.0;
        assert_eq!(dash_offset(&Progress { completed: 0, total: 0 }, c), 100.0);
        assert_eq!(dash_offset(&Progress { completed: 1, total: 2 }, c), 50.0);
        assert_eq!(dash_offset(&Progress { completed: 4, total: 4 }, c), 0.0);
    }
}
