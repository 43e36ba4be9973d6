//! Resource selection and dispatch for the step viewer

use reqwest::Url;

use crate::model::{PreferredFormat, ResourceType, StepResource, VideoSearch};

/// Base URL for video searches built from descriptors
const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Which resources the step viewer shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatFilter {
    Images,
    Videos,
    Text,
    #[default]
    Mixed,
}

impl FormatFilter {
    fn accepts(&self, resource_type: ResourceType) -> bool {
        match self {
            FormatFilter::Images => resource_type == ResourceType::Image,
            FormatFilter::Videos => resource_type == ResourceType::Video,
            FormatFilter::Text => resource_type == ResourceType::Text,
            FormatFilter::Mixed => true,
        }
    }
}

impl From<PreferredFormat> for FormatFilter {
    fn from(format: PreferredFormat) -> Self {
        match format {
            PreferredFormat::Images => FormatFilter::Images,
            PreferredFormat::Videos => FormatFilter::Videos,
            PreferredFormat::Text => FormatFilter::Text,
            PreferredFormat::Projects | PreferredFormat::Mixed => FormatFilter::Mixed,
        }
    }
}

impl From<Option<PreferredFormat>> for FormatFilter {
    fn from(format: Option<PreferredFormat>) -> Self {
        format.map(FormatFilter::from).unwrap_or_default()
    }
}

/// A resource ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedResource<'a> {
    /// Prose body stored in the resource's url column
    Prose { title: &'a str, body: &'a str },
    Image { alt: &'a str, src: &'a str },
    /// Link to a video search built from the descriptor
    VideoSearch { query: String, channel: Option<String>, url: String },
    Reference { title: &'a str, url: &'a str },
    Practice { title: &'a str, url: &'a str },
}

/// Resources passing `filter`, in their original order
pub fn select(resources: &[StepResource], filter: FormatFilter) -> Vec<&StepResource> {
    resources.iter().filter(|r| filter.accepts(r.resource_type)).collect()
}

/// Select and convert resources for display
///
/// Video resources with an unreadable descriptor and resources of unknown
/// type are dropped.
pub fn dispatch(resources: &[StepResource], filter: FormatFilter) -> Vec<RenderedResource<'_>> {
    select(resources, filter).into_iter().filter_map(render).collect()
}

fn render(resource: &StepResource) -> Option<RenderedResource<'_>> {
    match resource.resource_type {
        ResourceType::Text => {
            Some(RenderedResource::Prose { title: &resource.title, body: &resource.url })
        }
        ResourceType::Image => {
            Some(RenderedResource::Image { alt: &resource.title, src: &resource.url })
        }
        ResourceType::Video => {
            let Some(video) = VideoSearch::decode(&resource.url) else {
                tracing::warn!(
                    "Skipping video resource {} with unreadable descriptor",
                    resource.id
                );
                return None;
            };
            let url = video_search_url(&video)?;
            Some(RenderedResource::VideoSearch { query: video.query, channel: video.channel, url })
        }
        ResourceType::Reference => {
            Some(RenderedResource::Reference { title: &resource.title, url: &resource.url })
        }
        ResourceType::Practice => {
            Some(RenderedResource::Practice { title: &resource.title, url: &resource.url })
        }
        ResourceType::Unknown => {
            tracing::debug!("Skipping resource {} of unknown type", resource.id);
            None
        }
    }
}

/// Search page URL for a video descriptor
pub fn video_search_url(video: &VideoSearch) -> Option<String> {
    Url::parse_with_params(VIDEO_SEARCH_URL, &[("search_query", video.search_terms())])
        .ok()
        .map(String::from)
}
