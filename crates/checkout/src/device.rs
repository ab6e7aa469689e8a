//! Device capabilities resolved from the user agent.
//!
//! Detection runs once, at the boundary, and the result is passed into the
//! code that needs it (the WhatsApp hand-off picks its fallback text from it).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use storefront_core::ValueObject;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    MacOs,
    Windows,
    Linux,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Safari,
    Firefox,
    Edge,
    Opera,
    #[default]
    Unknown,
}

/// What the page knows about its window, when it knows anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportHint {
    pub width: u32,
    pub touch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapabilities {
    pub platform: Platform,
    pub browser: Browser,
    pub is_mobile: bool,
    pub is_tablet: bool,
}

impl ValueObject for DeviceCapabilities {}

struct UserAgentPatterns {
    ios: Regex,
    macos: Regex,
    android: Regex,
    windows: Regex,
    linux: Regex,
    mobile: Regex,
    mobile_token: Regex,
    ipad: Regex,
    edge: Regex,
    opera: Regex,
    chrome: Regex,
    safari: Regex,
    firefox: Regex,
}

impl UserAgentPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            ios: Regex::new(r"iPad|iPhone|iPod")?,
            macos: Regex::new(r"Macintosh|MacIntel|MacPPC|Mac68K")?,
            android: Regex::new(r"Android")?,
            windows: Regex::new(r"Windows")?,
            linux: Regex::new(r"Linux")?,
            mobile: Regex::new(r"(?i)Mobi|Android")?,
            mobile_token: Regex::new(r"Mobile")?,
            ipad: Regex::new(r"iPad")?,
            edge: Regex::new(r"Edge?/")?,
            opera: Regex::new(r"Opera|OPR/")?,
            chrome: Regex::new(r"Chrome|CriOS")?,
            safari: Regex::new(r"Safari")?,
            firefox: Regex::new(r"Firefox|FxiOS")?,
        })
    }

    fn get() -> Option<&'static Self> {
        static PATTERNS: OnceLock<Option<UserAgentPatterns>> = OnceLock::new();
        PATTERNS
            .get_or_init(|| {
                UserAgentPatterns::compile()
                    .inspect_err(|e| warn!(error = %e, "user agent patterns failed to compile"))
                    .ok()
            })
            .as_ref()
    }
}

impl DeviceCapabilities {
    /// Classify a user agent, refined by the viewport when known.
    pub fn detect(user_agent: &str, viewport: Option<ViewportHint>) -> Self {
        let Some(p) = UserAgentPatterns::get() else {
            return Self::default();
        };
        let touch = viewport.is_some_and(|v| v.touch);
        let width = viewport.map(|v| v.width);

        let android = p.android.is_match(user_agent);
        // iPadOS reports itself as a Mac; only the touch screen gives it away.
        let touch_mac = p.macos.is_match(user_agent) && touch;
        let ios = p.ios.is_match(user_agent) || touch_mac;

        let platform = if ios {
            Platform::Ios
        } else if android {
            Platform::Android
        } else if p.macos.is_match(user_agent) {
            Platform::MacOs
        } else if p.windows.is_match(user_agent) {
            Platform::Windows
        } else if p.linux.is_match(user_agent) {
            Platform::Linux
        } else {
            Platform::Unknown
        };

        let browser = if p.edge.is_match(user_agent) {
            Browser::Edge
        } else if p.opera.is_match(user_agent) {
            Browser::Opera
        } else if p.chrome.is_match(user_agent) {
            Browser::Chrome
        } else if p.firefox.is_match(user_agent) {
            Browser::Firefox
        } else if p.safari.is_match(user_agent) {
            Browser::Safari
        } else {
            Browser::Unknown
        };

        let small_touch_screen = touch && width.is_some_and(|w| w < 768);
        let is_mobile = p.mobile.is_match(user_agent) || ios || small_touch_screen;
        let is_tablet = p.ipad.is_match(user_agent)
            || touch_mac
            || (android && !p.mobile_token.is_match(user_agent))
            || (is_mobile && touch && width.is_some_and(|w| (768..=1024).contains(&w)));

        Self {
            platform,
            browser,
            is_mobile,
            is_tablet,
        }
    }

    pub fn is_desktop(&self) -> bool {
        !self.is_mobile && !self.is_tablet
    }
}

impl Default for DeviceCapabilities {
    /// Unknown desktop browser.
    fn default() -> Self {
        Self {
            platform: Platform::Unknown,
            browser: Browser::Unknown,
            is_mobile: false,
            is_tablet: false,
        }
    }
}
