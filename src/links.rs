use std::sync::LazyLock;

use regex::Regex;

static SHORT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://vm\.tiktok\.com/[^/\s]+/").expect("short link pattern is valid")
});

static VIDEO_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://m\.tiktok\.com/v/[^/?#\s]+\.html").expect("video page pattern is valid")
});

/// First TikTok short link in `text`, if any. Later links are ignored.
pub fn find_short_link(text: &str) -> Option<&str> {
    SHORT_LINK.find(text).map(|m| m.as_str())
}

/// Canonical video page URL inside a short link's redirect location.
pub fn find_video_page(location: &str) -> Option<&str> {
    VIDEO_PAGE.find(location).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_link_inside_text() {
        let text = "lol look at this https://vm.tiktok.com/ZMabc123/ so good";
        assert_eq!(find_short_link(text), Some("https://vm.tiktok.com/ZMabc123/"));
    }

    #[test]
    fn test_only_first_link_is_returned() {
        let text = "https://vm.tiktok.com/AAA/ and https://vm.tiktok.com/BBB/";
        assert_eq!(find_short_link(text), Some("https://vm.tiktok.com/AAA/"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_short_link("hello there"), None);
        assert_eq!(find_short_link("https://www.tiktok.com/@someone"), None);
        // trailing slash is part of the short link shape
        assert_eq!(find_short_link("https://vm.tiktok.com/ZMabc123"), None);
        assert_eq!(find_short_link("http://vm.tiktok.com/ZMabc123/"), None);
        assert_eq!(find_short_link("https://vmxtiktok.com/ZMabc123/"), None);
    }

    #[test]
    fn test_video_page_ignores_query() {
        let location = "https://m.tiktok.com/v/987654321.html?_d=secCgYIASAHKAE&language=en";
        assert_eq!(
            find_video_page(location),
            Some("https://m.tiktok.com/v/987654321.html")
        );
    }

    #[test]
    fn test_video_page_mismatch() {
        assert_eq!(find_video_page(""), None);
        assert_eq!(
            find_video_page("https://www.tiktok.com/@user/video/987654321"),
            None
        );
    }
}
