//! Responsive picture generation.

use crate::node::{Element, Node};

/// One `<source>` breakpoint: the rendition width to request and the media
/// query it applies to. The last breakpoint is the fallback and usually has
/// no media query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub media: Option<&'static str>,
    pub width: u32,
}

/// Builds a responsive picture element for an image URL.
pub trait PictureBuilder: Send + Sync {
    fn picture(&self, src: &str, alt: &str, eager: bool, breakpoints: &[Breakpoint]) -> Node;
}

/// Picture builder for the edge delivery image service.
///
/// Emits one WebP `<source>` per breakpoint, one original-format `<source>`
/// per non-final breakpoint, and a final `<img>`. Only the path of `src` is
/// kept; renditions are requested as
/// `{path}?width={w}&format={fmt}&optimize=medium`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedPicture;

impl PictureBuilder for OptimizedPicture {
    fn picture(&self, src: &str, alt: &str, eager: bool, breakpoints: &[Breakpoint]) -> Node {
        let pathname = image_pathname(src);
        let pathname = pathname.as_str();
        let ext = pathname
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
            .unwrap_or("jpeg");
        let mut picture = Element::new("picture");

        for br in breakpoints {
            let mut source = Element::new("source")
                .with_attr("type", "image/webp")
                .with_attr("srcset", rendition(pathname, br.width, "webply"));
            if let Some(media) = br.media {
                source.set_attr("media", media);
            }
            picture.push(source);
        }

        for (i, br) in breakpoints.iter().enumerate() {
            if i + 1 < breakpoints.len() {
                let mut source =
                    Element::new("source").with_attr("srcset", rendition(pathname, br.width, ext));
                if let Some(media) = br.media {
                    source.set_attr("media", media);
                }
                picture.push(source);
            } else {
                picture.push(
                    Element::new("img")
                        .with_attr("loading", if eager { "eager" } else { "lazy" })
                        .with_attr("alt", alt)
                        .with_attr("src", rendition(pathname, br.width, ext)),
                );
            }
        }

        picture.into()
    }
}

/// Base used to resolve repository-relative and protocol-relative sources.
const RELATIVE_BASE: &str = "https://localhost/";

/// Path component of an image reference, without query or fragment.
/// Unparseable input is kept as-is.
fn image_pathname(src: &str) -> String {
    let parsed = reqwest::Url::parse(src)
        .or_else(|_| reqwest::Url::parse(RELATIVE_BASE).and_then(|base| base.join(src)));
    match parsed {
        Ok(url) => url.path().to_owned(),
        Err(e) => {
            tracing::debug!(src, error = %e, "image source is not a URL; using it verbatim");
            src.to_owned()
        }
    }
}

fn rendition(pathname: &str, width: u32, format: &str) -> String {
    format!("{pathname}?width={width}&format={format}&optimize=medium")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINTS: [Breakpoint; 3] = [
        Breakpoint {
            media: Some("(min-width: 900px)"),
            width: 600,
        },
        Breakpoint {
            media: Some("(min-width: 600px)"),
            width: 400,
        },
        Breakpoint {
            media: None,
            width: 320,
        },
    ];

    fn render(src: &str, eager: bool) -> Element {
        match OptimizedPicture.picture(src, "Shoe", eager, &BREAKPOINTS) {
            Node::Element(el) => el,
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn emits_webp_sources_then_fallbacks_then_img() {
        let picture = render("/content/dam/luma3/shoe.png", false);
        assert_eq!(picture.tag(), "picture");
        let sources = picture.find_by_tag("source");
        assert_eq!(sources.len(), 5);
        assert_eq!(sources[0].attr("type"), Some("image/webp"));
        assert_eq!(
            sources[0].attr("srcset"),
            Some("/content/dam/luma3/shoe.png?width=600&format=webply&optimize=medium")
        );
        assert_eq!(sources[0].attr("media"), Some("(min-width: 900px)"));
        assert_eq!(sources[2].attr("media"), None);
        assert_eq!(
            sources[3].attr("srcset"),
            Some("/content/dam/luma3/shoe.png?width=600&format=png&optimize=medium")
        );
        assert_eq!(
            sources[4].attr("srcset"),
            Some("/content/dam/luma3/shoe.png?width=400&format=png&optimize=medium")
        );

        let imgs = picture.find_by_tag("img");
        assert_eq!(imgs.len(), 1);
        assert_eq!(imgs[0].attr("loading"), Some("lazy"));
        assert_eq!(imgs[0].attr("alt"), Some("Shoe"));
        assert_eq!(
            imgs[0].attr("src"),
            Some("/content/dam/luma3/shoe.png?width=320&format=png&optimize=medium")
        );
    }

    #[test]
    fn eager_pictures_load_eagerly() {
        let picture = render("/a.jpg", true);
        assert_eq!(picture.find_by_tag("img")[0].attr("loading"), Some("eager"));
    }

    #[test]
    fn absolute_urls_keep_only_the_path() {
        let picture = render(
            "https://author.example.com/content/dam/luma3/shoe.jpg?ck=1#top",
            false,
        );
        assert_eq!(
            picture.find_by_tag("img")[0].attr("src"),
            Some("/content/dam/luma3/shoe.jpg?width=320&format=jpg&optimize=medium")
        );
    }

    #[test]
    fn missing_extension_falls_back_to_jpeg() {
        let picture = render("/content/dam/luma3/shoe", false);
        assert_eq!(
            picture.find_by_tag("img")[0].attr("src"),
            Some("/content/dam/luma3/shoe?width=320&format=jpeg&optimize=medium")
        );
    }

    #[test]
    fn image_pathname_variants() {
        assert_eq!(image_pathname("https://x.com"), "/");
        assert_eq!(image_pathname("https://x.com/a/b.png?x=1"), "/a/b.png");
        assert_eq!(image_pathname("/a/b.png#f"), "/a/b.png");
        assert_eq!(image_pathname("/content/dam/luma3/shoe.png"), "/content/dam/luma3/shoe.png");
    }

    #[test]
    fn protocol_relative_sources_keep_only_the_path() {
        assert_eq!(image_pathname("//cdn.host/a.png"), "/a.png");
        assert_eq!(image_pathname("//cdn.host/a/b.webp?v=2"), "/a/b.webp");

        let picture = render("//cdn.host/a.png", false);
        assert_eq!(
            picture.find_by_tag("img")[0].attr("src"),
            Some("/a.png?width=320&format=png&optimize=medium")
        );
    }
}
