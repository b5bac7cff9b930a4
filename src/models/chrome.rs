use serde::Serialize;

/// Shell configuration delivered to the frontend: branding, theme
/// tokens, navigation and the card action row. Nav buttons and card
/// actions ship disabled; the client renders them as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ChromeConfig {
    pub brand: Brand,
    pub palette: Palette,
    pub nav: Vec<NavItem>,
    pub card: CardChrome,
    pub copy: CopyStrings,
}

#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    pub name: &'static str,
    pub logo_path: &'static str,
}

/// Chakra-style color tokens, one set per color mode.
#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub light: ModeTokens,
    pub dark: ModeTokens,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeTokens {
    pub page_bg: &'static str,
    pub header_bg: &'static str,
    pub card_bg: &'static str,
    pub card_border: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardChrome {
    pub badge: &'static str,
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyStrings {
    pub upload_label: &'static str,
    pub caption_label: &'static str,
    pub caption_placeholder: &'static str,
    pub submit_button: &'static str,
    pub submit_pending: &'static str,
    pub post_created: &'static str,
    pub post_created_detail: &'static str,
}

pub fn laf_chrome() -> ChromeConfig {
    ChromeConfig {
        brand: Brand {
            name: "LAF",
            logo_path: "/images/laflogo.png",
        },
        palette: Palette {
            light: ModeTokens {
                page_bg: "gray.50",
                header_bg: "blue.500",
                card_bg: "white",
                card_border: "gray.200",
                accent: "blue.400",
            },
            dark: ModeTokens {
                page_bg: "gray.900",
                header_bg: "blue.600",
                card_bg: "gray.800",
                card_border: "gray.700",
                accent: "blue.400",
            },
        },
        nav: vec![
            NavItem { label: "Home", icon: "home", enabled: false },
            NavItem { label: "Top", icon: "trophy", enabled: false },
            NavItem { label: "Profile", icon: "user-circle", enabled: false },
        ],
        card: CardChrome {
            badge: "Fresh",
            actions: vec![
                CardAction { label: "Share meme", icon: "share", enabled: false },
                CardAction { label: "Like meme", icon: "laugh", enabled: false },
                CardAction { label: "Comment", icon: "comment", enabled: false },
            ],
        },
        copy: CopyStrings {
            upload_label: "Upload a funny image or GIF",
            caption_label: "Add a funny caption",
            caption_placeholder: "What's the story behind this?",
            submit_button: "Post to LAF",
            submit_pending: "Posting...",
            post_created: "Post created!",
            post_created_detail: "Your funny content has been posted",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_ships_inert_controls() {
        let chrome = laf_chrome();
        assert!(chrome.nav.iter().all(|n| !n.enabled));
        assert!(chrome.card.actions.iter().all(|a| !a.enabled));
    }

    #[test]
    fn chrome_serializes_with_both_color_modes() {
        let json = serde_json::to_value(laf_chrome()).unwrap();
        assert_eq!(json["brand"]["name"], "LAF");
        assert_eq!(json["palette"]["light"]["page_bg"], "gray.50");
        assert_eq!(json["palette"]["dark"]["page_bg"], "gray.900");
        assert_eq!(json["card"]["badge"], "Fresh");
    }
}
