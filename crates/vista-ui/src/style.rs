use vista_engine::paint::Color;

/// Colors and metrics used by every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub panel_bg: Color,
    pub title_color: Color,
    pub text_color: Color,
    pub dim_text_color: Color,
    pub widget_bg: Color,
    pub widget_hover_bg: Color,
    pub widget_active_bg: Color,
    pub accent: Color,
    pub separator: Color,

    pub font_size: f32,
    pub title_size: f32,
    pub padding: f32,
    pub row_height: f32,
    pub spacing: f32,
    pub track_height: f32,
    pub thumb_width: f32,
    pub box_size: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            panel_bg: Color::from_straight(0.08, 0.09, 0.12, 0.92),
            title_color: Color::from_straight(1.0, 1.0, 1.0, 1.0),
            text_color: Color::from_straight(0.85, 0.85, 0.9, 1.0),
            dim_text_color: Color::from_straight(0.55, 0.58, 0.65, 1.0),
            widget_bg: Color::from_straight(0.15, 0.2, 0.3, 1.0),
            widget_hover_bg: Color::from_straight(0.2, 0.27, 0.4, 1.0),
            widget_active_bg: Color::from_straight(0.25, 0.35, 0.55, 1.0),
            accent: Color::from_straight(0.2, 0.6, 1.0, 1.0),
            separator: Color::from_straight(0.3, 0.33, 0.4, 1.0),

            font_size: 13.0,
            title_size: 15.0,
            padding: 10.0,
            row_height: 20.0,
            spacing: 4.0,
            track_height: 6.0,
            thumb_width: 8.0,
            box_size: 14.0,
        }
    }
}
