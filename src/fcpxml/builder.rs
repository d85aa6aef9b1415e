use log::debug;

use crate::app_config::RenderConfig;
use crate::errors::BuildError;
use crate::fcpxml::element::Element;
use crate::subtitle_processor::SubtitleEntry;
use crate::timecode::{FrameRateProfile, custom_round};

// @module: FCPXML document builder

// Parameter keys of the Basic Title effect. These are Motion template
// identifiers and must match the effect bit-for-bit.
const POSITION_KEY: &str = "9999/999166631/999166633/1/100/101";
const ALIGNMENT_KEY: &str = "9999/999166631/999166633/2/354/999169573/401";
const FLATTEN_KEY: &str = "9999/999166631/999166633/2/351";

const EFFECT_UID: &str =
    ".../Titles.localized/Bumper:Opener.localized/Basic Title.localized/Basic Title.moti";

/// Maximum length of the title's display name attribute. Display-only,
/// the real subtitle text is never truncated.
const DISPLAY_NAME_MAX_CHARS: usize = 50;

/// Builds the fcpxml document tree from subtitle entries.
pub struct FcpXmlBuilder {
    config: RenderConfig,
    profile: FrameRateProfile,
}

/// Fixed-order payload of a title node. The fcpxml DTD requires the
/// text body to precede the text-style-def in document order; keeping
/// them as struct fields consumed in declaration order enforces that
/// structurally instead of relying on append-order discipline.
struct TitleContent {
    position: Element,
    alignment: Element,
    flatten: Element,
    text_body: Element,
    style_def: Element,
}

impl TitleContent {
    fn attach_to(self, title: Element) -> Element {
        title
            .child(self.position)
            .child(self.alignment)
            .child(self.flatten)
            .child(self.text_body)
            .child(self.style_def)
    }
}

impl FcpXmlBuilder {
    /// Create a builder; the frame rate profile is derived once per
    /// build and never stored in config.
    pub fn new(config: RenderConfig) -> Self {
        let profile = FrameRateProfile::new(config.frame_rate);
        FcpXmlBuilder { config, profile }
    }

    /// Build the complete document tree.
    pub fn build(&self, entries: &[SubtitleEntry]) -> Result<Element, BuildError> {
        if entries.is_empty() {
            return Err(BuildError::EmptySubtitles);
        }

        // Total duration tracks the last entry's end, independent of
        // any earlier entry's timing.
        let total_duration = self.total_duration_string(entries.last().map(|e| e.end_seconds()).unwrap_or(0.0));
        debug!("Building fcpxml for {} entries, total duration {}", entries.len(), total_duration);

        let resources = Element::new("resources")
            .child(self.format_resource())
            .child(self.effect_resource());

        let mut gap = Element::new("gap")
            .attr("name", "空隙")
            .attr("offset", "0s")
            .attr("duration", total_duration.clone())
            .attr("start", self.pinned_start_string());

        for entry in entries {
            gap = gap.child(self.title_element(entry));
        }

        let sequence = Element::new("sequence")
            .attr("format", "r1")
            .attr("duration", total_duration)
            .attr("tcStart", "0s")
            .attr("tcFormat", "NDF")
            .attr("audioLayout", "stereo")
            .attr("audioRate", "48k")
            .child(Element::new("spine").child(gap));

        let library = Element::new("library").child(
            Element::new("event")
                .attr("name", self.config.event_name.clone())
                .child(
                    Element::new("project")
                        .attr("name", self.config.project_name.clone())
                        .child(sequence),
                ),
        );

        Ok(Element::new("fcpxml")
            .attr("version", "1.7")
            .child(resources)
            .child(library))
    }

    /// The shared format resource (id r1).
    fn format_resource(&self) -> Element {
        let name = format!(
            "FFVideoFormat{}x{}p{}",
            self.config.width,
            self.config.height,
            self.config.frame_rate.rounded_fps()
        );
        Element::new("format")
            .attr("id", "r1")
            .attr("name", name)
            .attr("frameDuration", format!("{}s", self.config.frame_rate.rational_string()))
            .attr("width", self.config.width.to_string())
            .attr("height", self.config.height.to_string())
            .attr("colorSpace", "1-1-1 (Rec. 709)")
    }

    /// The shared Basic Title effect resource (id r2).
    fn effect_resource(&self) -> Element {
        Element::new("effect")
            .attr("id", "r2")
            .attr("name", "Basic Title")
            .attr("uid", EFFECT_UID)
    }

    /// One lane-1 title overlay for a subtitle entry.
    fn title_element(&self, entry: &SubtitleEntry) -> Element {
        let title = Element::new("title")
            .attr("name", Self::display_name(entry))
            .attr("lane", "1")
            .attr("offset", self.offset_string(entry.start_seconds()))
            .attr("ref", "r2")
            .attr("duration", self.duration_string(entry.duration_seconds()))
            .attr("start", self.pinned_start_string());

        let style_id = format!("ts{}", entry.seq_num);

        let content = TitleContent {
            position: param(
                "Position",
                POSITION_KEY,
                &format!("{} {}", self.config.alignment.x_position(), self.config.y_position),
            ),
            alignment: param("Alignment", ALIGNMENT_KEY, self.config.alignment.param_label()),
            flatten: param("Flatten", FLATTEN_KEY, "1"),
            text_body: Element::new("text").child(
                Element::new("text-style")
                    .attr("ref", style_id.clone())
                    .text(entry.text.clone()),
            ),
            style_def: Element::new("text-style-def").attr("id", style_id).child(
                Element::new("text-style")
                    .attr("font", "Helvetica")
                    .attr("fontSize", "72")
                    .attr("fontFace", "Regular")
                    .attr("fontColor", "1 1 1 1")
                    .attr("alignment", "center"),
            ),
        };

        content.attach_to(title)
    }

    /// Timeline offset of an entry: whole frames from time zero, in
    /// frame-duration units, shifted by the project start epoch.
    fn offset_string(&self, start_seconds: f64) -> String {
        let offset = custom_round(start_seconds * self.profile.frame_rate_float, 0)
            * self.profile.molecular
            + self.profile.project_start_ticks;
        format!("{}/{}s", offset as i64, self.profile.denominator as i64)
    }

    /// Display duration, normalized to fixed 1/120000-second units
    /// regardless of frame rate. Degenerate entries (end before start)
    /// come out non-positive; that is passed through unchanged.
    fn duration_string(&self, duration_seconds: f64) -> String {
        let duration = custom_round(duration_seconds * self.profile.frame_rate_float, 0)
            * self.profile.molecular
            * 120000.0
            / self.profile.denominator;
        format!("{}/120000s", duration as i64)
    }

    /// Clip-internal start, pinned to the project start epoch for the
    /// gap and every title alike; only the offset varies per entry.
    fn pinned_start_string(&self) -> String {
        format!(
            "{}/{}s",
            self.profile.project_start_ticks as i64,
            self.profile.denominator as i64
        )
    }

    /// Sequence/gap duration derived from the end of the last entry.
    fn total_duration_string(&self, total_seconds: f64) -> String {
        let frames = custom_round(total_seconds * self.profile.frame_rate_float, 0);
        format!(
            "{}/{}s",
            (frames * self.profile.molecular) as i64,
            self.profile.denominator as i64
        )
    }

    /// Flat single-line display label, truncated for readability in
    /// the FCP timeline.
    fn display_name(entry: &SubtitleEntry) -> String {
        entry
            .flattened_text()
            .chars()
            .take(DISPLAY_NAME_MAX_CHARS)
            .collect()
    }
}

fn param(name: &str, key: &str, value: &str) -> Element {
    Element::new("param")
        .attr("name", name)
        .attr("key", key)
        .attr("value", value)
}
