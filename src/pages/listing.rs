use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{
    icons::{self, BROKEN_IMAGE_GLYPH, DIRECTORY_GLYPH, VIDEO_GLYPH},
    listing::{EntryDescriptor, ListingModel},
    thumbnail::THUMBNAIL_PREFIX,
};

// --- Assets ---
const STYLE: &str = include_str!("../../assets/listing.css");
const LAZY_LOAD_SCRIPT: &str = include_str!("../../assets/listing.js");

/// 1x1 transparent png shown until the real thumbnail scrolls into view.
pub const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

// --- Page ---

pub fn render(model: &ListingModel) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (model.title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="container" {
                    header {
                        h1 { (model.title) }
                        div class="path-nav" { (model.current_path) }
                    }

                    @if let Some(parent) = &model.parent_path {
                        a href=(parent) class="back-link" {
                            span class="back-arrow" { "←" }
                            " Parent Directory"
                        }
                    }

                    div class="files-grid" {
                        @for entry in &model.entries {
                            (card(entry))
                        }
                    }
                }
                script { (PreEscaped(LAZY_LOAD_SCRIPT)) }
            }
        }
    }
}

// --- Cards ---

fn card(entry: &EntryDescriptor) -> Markup {
    let viewer_href = format!("{}?view=media", entry.path);
    html! {
        @if entry.is_dir {
            div class="file-card directory" {
                a href=(entry.path) {
                    div class="thumbnail" {
                        div class="icon directory-icon" { (DIRECTORY_GLYPH) }
                    }
                    div class="file-info" {
                        div class="file-name" { (entry.name) }
                        div class="file-meta" { "Directory" }
                    }
                }
            }
        } @else if entry.is_image() {
            div class="file-card" {
                a href=(viewer_href) {
                    // listing.js swaps the placeholder for data-src once visible
                    div class="thumbnail" data-broken=(BROKEN_IMAGE_GLYPH) {
                        img src=(PLACEHOLDER_IMAGE)
                            data-src={ (THUMBNAIL_PREFIX) (entry.path) }
                            alt=(entry.name)
                            class="lazy-load";
                    }
                    div class="file-info" {
                        div class="file-name" { (entry.name) }
                        div class="file-meta" { "Image · " (entry.display_size()) }
                    }
                }
            }
        } @else if entry.is_video() {
            div class="file-card" {
                a href=(viewer_href) {
                    div class="thumbnail" {
                        div class="file-thumbnail icon-video" { (VIDEO_GLYPH) }
                        div class="play-icon" {}
                    }
                    div class="file-info" {
                        div class="file-name" { (entry.name) }
                        div class="file-meta" { "Video · " (entry.display_size()) }
                    }
                }
            }
        } @else {
            // Anything that is neither image nor video downloads directly
            @let icon = icons::for_extension(&entry.extension);
            div class="file-card" {
                a href=(entry.path) {
                    div class="thumbnail" {
                        div class={ "file-thumbnail " (icon.class) } { (icon.glyph) }
                    }
                    div class="file-info" {
                        div class="file-name" { (entry.name) }
                        div class="file-meta" {
                            (entry.display_size()) " · " (entry.display_date())
                        }
                    }
                }
            }
        }
    }
}
