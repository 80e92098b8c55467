// DOM contract and UI strings used by the web frontend.

// Element ids
pub const ROOT_ID: &str = "cicerone";
pub const STATUS_ID: &str = "status-line";
pub const TOAST_ID: &str = "narration-toast";
pub const POI_LIST_ID: &str = "poi-list";
pub const SEARCH_ID: &str = "search-input";
pub const CATEGORY_ID: &str = "category-select";
pub const RADIUS_ID: &str = "radius-select";
pub const MODE_WALKING_ID: &str = "mode-walking";
pub const MODE_DRIVING_ID: &str = "mode-driving";
pub const RELOAD_ID: &str = "reload-button";
pub const STOP_ID: &str = "stop-button";
pub const FOLLOW_ID: &str = "follow-toggle";

// Attribute carrying the poi id on "listen" buttons
pub const LISTEN_ATTR: &str = "data-listen";

// Map layer hand-off
pub const RENDER_EVENT: &str = "cicerone:render";

// UI strings
pub const ALL_LABEL: &str = "Tutte"; // display label for the "All" category sentinel
pub const NARRATING_TOAST: &str = "🎧 Sto leggendo...";
pub const LISTEN_LABEL: &str = "🔊 Ascolta descrizione";
pub const SPEECH_UNSUPPORTED_ALERT: &str = "La sintesi vocale non è supportata su questo browser.";
pub const ACTIVE_CLASS: &str = "active";

// Marker icons per category; unknown categories use DEFAULT_ICON
pub const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Montagna", "https://cdn-icons-png.flaticon.com/512/684/684908.png"),
    ("Città", "https://cdn-icons-png.flaticon.com/512/3179/3179068.png"),
    ("Lago", "https://cdn-icons-png.flaticon.com/512/727/727790.png"),
    ("Monumento", "https://cdn-icons-png.flaticon.com/512/3448/3448634.png"),
    ("Parco", "https://cdn-icons-png.flaticon.com/512/535/535239.png"),
];
pub const DEFAULT_ICON: &str = "https://cdn-icons-png.flaticon.com/512/854/854878.png";

#[inline]
pub fn icon_for(category: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, url)| *url)
        .unwrap_or(DEFAULT_ICON)
}
