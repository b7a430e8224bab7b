/// Page wiring constants: element ids, selectors, observer tuning and the
/// Easter-egg sequence.
///
/// Kept free of `web_sys` so host tests can `include!` this file.

// Canvas backgrounds, one per page section. Absent ids are skipped.
pub const GRID_CANVAS_ID: &str = "grid-canvas";
pub const MYCELIUM_CANVAS_ID: &str = "mycelium-canvas";
pub const WAVE_CANVAS_ID: &str = "wave-canvas";
pub const NETWORK_CANVAS_ID: &str = "network-canvas";
pub const DIAGRAM_SVG_ID: &str = "ownership-diagram";

// Reveal on scroll
pub const REVEAL_SELECTOR: &str = ".reveal";
pub const REVEAL_CLASS: &str = "visible";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -80px 0px";
pub const TEXT_REVEAL_SELECTOR: &str = ".section-header h2";
pub const TEXT_REVEAL_CLASS: &str = "text-revealed";
pub const TEXT_REVEAL_THRESHOLD: f64 = 0.5;

// Canvas sections start a little before they scroll into view
pub const SECTION_VISIBILITY_THRESHOLD: f64 = 0.0;

// Navigation
pub const NAV_SELECTOR: &str = ".nav";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const NAV_BACKGROUND: &str = "rgba(250, 248, 245, 0.8)";
pub const NAV_BACKGROUND_CONDENSED: &str = "rgba(250, 248, 245, 0.95)";
pub const NAV_SHADOW_CONDENSED: &str = "0 1px 20px rgba(0, 0, 0, 0.05)";

// Hover effects
pub const MAGNETIC_SELECTOR: &str = ".btn-primary, .nav-cta";
pub const ORB_SELECTOR: &str = ".orb";
pub const ENSO_SELECTOR: &str = ".hero-visual .zen-circle";
pub const STREAK_CONTAINER_SELECTOR: &str = ".ensō-dry-streaks";
pub const STREAK_CLASS: &str = "dry-streak";

// Contact form mock
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const FORM_GROUP_SELECTOR: &str = ".form-group";
pub const FORM_FIELD_SELECTOR: &str = "input, textarea";
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";
pub const FORM_FOCUS_SHIFT: &str = "translateX(4px)";
pub const SUBMIT_BUSY_OPACITY: &str = "0.7";
pub const SUBMIT_SENT_BACKGROUND: &str = "#7A8A72";

// Scroll progress bar, created by the page controller
pub const PROGRESS_CLASS: &str = "scroll-progress";
pub const PROGRESS_BAR_CLASS: &str = "scroll-progress-bar";

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

// Easter egg
pub const SPORES_CLASS: &str = "myo-spores";
pub const KONAMI_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Injected once by the page controller; covers the submit spinner and the
/// scroll progress bar.
pub const INJECTED_STYLES: &str = "
@keyframes spin {
    from { transform: rotate(0deg); }
    to { transform: rotate(360deg); }
}
.spin {
    animation: spin 1s linear infinite;
}
.scroll-progress {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 2px;
    z-index: 1000;
    background: transparent;
}
.scroll-progress-bar {
    height: 100%;
    width: 0;
    background: linear-gradient(90deg, var(--color-sage) 0%, var(--color-terracotta) 100%);
    transition: width 0.1s ease-out;
}
";

// Icons shown next to the submit label while sending and once sent
pub const SENDING_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" class="spin"><circle cx="12" cy="12" r="10" stroke-dasharray="50" stroke-dashoffset="20"/></svg>"#;
pub const SENT_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><polyline points="20 6 9 17 4 12" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
