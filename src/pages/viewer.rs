use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{error::ServeError, viewer::MediaViewModel};

// --- Assets ---
const STYLE: &str = include_str!("../../assets/viewer.css");
const POPOUT_SCRIPT: &str = include_str!("../../assets/popout.js");
const POPOUT_CHILD_SCRIPT: &str = include_str!("../../assets/popout-child.js");
const POPOUT_STYLE: &str = "body { margin: 0; background-color: #000; overflow: hidden; } \
                            video { width: 100%; height: 100vh; }";

// --- Page ---

/// Renders the single-file viewer. Video pages carry a pop-out player that
/// starts at the main player's position and pauses it when closed.
pub fn render(view: &MediaViewModel) -> Result<Markup, ServeError> {
    let popout = if view.is_video {
        Some(popout_bootstrap(view)?)
    } else {
        None
    };

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (view.name) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h1 { (view.name) }
                    div {
                        a href=(view.parent_path) class="button" { "Back to directory" }
                    }
                }
                div class="container" {
                    div class="media-container" {
                        @if view.is_image {
                            img src=(view.file_path) alt=(view.name);
                        } @else if view.is_video {
                            video #videoPlayer controls {
                                source src=(view.file_path) type=(view.content_type);
                                "Your browser does not support the video tag."
                            }
                        }
                    }

                    div class="controls" {
                        div {
                            @if view.is_video {
                                button #popupBtn type="button" class="button popup-button" { "Pop-out Player" }
                            }
                            a href=(view.file_path) download class="button download-button" { "Download" }
                        }
                    }

                    div class="metadata" {
                        p { strong { "File name:" } " " (view.name) }
                        p { strong { "File size:" } " " (view.size) }
                        p { strong { "Last modified:" } " " (view.modified) }
                        p { strong { "Content type:" } " " (view.content_type) }
                    }
                }
                @if let Some(bootstrap) = popout {
                    script { (PreEscaped(bootstrap)) }
                    script { (PreEscaped(POPOUT_SCRIPT)) }
                }
            }
        }
    })
}

// --- Pop-out Player ---

fn popout_document(view: &MediaViewModel) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (view.name) }
                style { (PreEscaped(POPOUT_STYLE)) }
            }
            body {
                video #popupVideo controls autoplay {
                    source src=(view.file_path) type=(view.content_type);
                    "Your browser does not support the video tag."
                }
                script { (PreEscaped(POPOUT_CHILD_SCRIPT)) }
            }
        }
    }
}

/// Globals read by the pop-out script.
fn popout_bootstrap(view: &MediaViewModel) -> Result<String, ServeError> {
    let window = script_literal(&view.name)?;
    let document = script_literal(&popout_document(view).into_string())?;
    Ok(format!(
        "const POPOUT_WINDOW = {window};\nconst POPOUT_DOCUMENT = {document};"
    ))
}

/// JSON string literal that is safe inside an inline `<script>`.
fn script_literal(value: &str) -> Result<String, ServeError> {
    let json =
        serde_json::to_string(value).map_err(|e| ServeError::RenderFailure(e.to_string()))?;
    // A literal </script> would end the outer script element early
    Ok(json.replace("</", "<\\/").replace("<!--", "<\\!--"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(name: &str, content_type: &str) -> MediaViewModel {
        MediaViewModel {
            name: name.to_string(),
            file_path: format!("/media/{name}"),
            parent_path: "/media".to_string(),
            is_image: content_type.starts_with("image/"),
            is_video: content_type.starts_with("video/"),
            content_type: content_type.to_string(),
            size: "1.0 KiB".to_string(),
            modified: "Jan 02, 2006 15:04:05".to_string(),
        }
    }

    #[test]
    fn image_page_embeds_image_and_download_link() {
        let page = render(&view("photo.png", "image/png")).unwrap().into_string();
        assert!(page.contains(r#"<img src="/media/photo.png" alt="photo.png">"#));
        assert!(page.contains(r#"href="/media/photo.png" download"#));
        assert!(page.contains(r#"<a href="/media" class="button">"#));
        assert!(!page.contains("<video"));
        assert!(!page.contains("popupBtn"));
    }

    #[test]
    fn metadata_panel_lists_file_details() {
        let page = render(&view("photo.png", "image/png")).unwrap().into_string();
        assert!(page.contains("1.0 KiB"));
        assert!(page.contains("Jan 02, 2006 15:04:05"));
        assert!(page.contains("image/png"));
    }

    #[test]
    fn video_page_has_player_and_popout() {
        let page = render(&view("clip.mp4", "video/mp4")).unwrap().into_string();
        assert!(page.contains(r#"<video id="videoPlayer" controls>"#));
        assert!(page.contains(r#"<source src="/media/clip.mp4" type="video/mp4">"#));
        assert!(page.contains(r#"<button id="popupBtn""#));
        assert!(page.contains("POPOUT_DOCUMENT"));
        assert!(!page.contains("<img"));
    }

    #[test]
    fn popout_syncs_position_and_pauses_source_on_close() {
        let page = render(&view("clip.mp4", "video/mp4")).unwrap().into_string();
        assert!(page.contains("video.currentTime = mainVideo.currentTime"));
        assert!(page.contains("window.onbeforeunload"));
        assert!(page.contains("mainVideo.pause()"));
        assert!(page.contains("window.opener"));
    }

    #[test]
    fn popout_document_cannot_close_the_outer_script() {
        let bootstrap = popout_bootstrap(&view("</script>.mp4", "video/mp4")).unwrap();
        assert!(!bootstrap.contains("</script>"));
        assert!(bootstrap.contains(r"<\/script>"));
    }
}
