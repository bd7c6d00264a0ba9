/// Path of the file upload integration, relative to the API base.
pub const UPLOAD_PATH: &str = "integrations/upload";

pub const HEADER_API_KEY: &str = "api_key";
pub const HEADER_FILE_NAME: &str = "X-File-Name";

pub fn url_entities(base: &str, kind: &str) -> String {
    format!("{}/entities/{}", base, kind)
}

pub fn url_entities_id(base: &str, kind: &str, id: &str) -> String {
    format!("{}/{}", url_entities(base, kind), id)
}

pub fn url_upload(base: &str) -> String {
    format!("{}/{}", base, UPLOAD_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_hang_off_the_base() {
        let base = "https://api.example.org/apps/alumni";
        assert_eq!(
            url_entities(base, "Event"),
            "https://api.example.org/apps/alumni/entities/Event"
        );
        assert_eq!(
            url_entities_id(base, "News", "abc"),
            "https://api.example.org/apps/alumni/entities/News/abc"
        );
        assert_eq!(
            url_upload(base),
            "https://api.example.org/apps/alumni/integrations/upload"
        );
    }
}
