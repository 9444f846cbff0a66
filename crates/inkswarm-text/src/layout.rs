//! Multi-line layout: literal lines, fixed line height, no wrapping

use inkswarm_core::TextSettings;

/// Where one line of text is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout<'a> {
    pub text: &'a str,
    pub x: f32,
    pub baseline_y: f32,
}

/// Split `text` into lines and place each one.
///
/// The first baseline sits at `padding_top + line_height`; each following line
/// moves down by `line_height`. Both values are truncated to whole pixels.
pub fn layout_lines<'a>(text: &'a str, settings: &TextSettings) -> Vec<LineLayout<'a>> {
    let line_height = settings.line_height.trunc();
    let mut baseline_y = settings.padding_top.trunc() + line_height;

    text.split('\n')
        .map(|line| {
            let placed = LineLayout {
                text: line.strip_suffix('\r').unwrap_or(line),
                x: settings.padding_left,
                baseline_y,
            };
            baseline_y += line_height;
            placed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_advance_by_line_height() {
        let settings = TextSettings {
            line_height: 100.0,
            padding_left: 40.0,
            padding_top: 60.0,
            ..Default::default()
        };
        let lines = layout_lines("ab\ncd\r\n", &settings);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "ab");
        assert_eq!(lines[0].baseline_y, 160.0);
        assert_eq!(lines[1].text, "cd");
        assert_eq!(lines[1].baseline_y, 260.0);
        assert_eq!(lines[2].text, "");
        assert!(lines.iter().all(|l| l.x == 40.0));
    }

    #[test]
    fn vertical_metrics_are_truncated() {
        let settings = TextSettings {
            line_height: 10.9,
            padding_top: 5.7,
            padding_left: 3.5,
            ..Default::default()
        };
        let lines = layout_lines("a\nb", &settings);
        assert_eq!(lines[0].baseline_y, 15.0);
        assert_eq!(lines[1].baseline_y, 25.0);
        assert_eq!(lines[0].x, 3.5);
    }
}
