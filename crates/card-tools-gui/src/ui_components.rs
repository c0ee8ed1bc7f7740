use card_layout::LayoutOptions;
use eframe::egui;

/// Builder for creating sliders with automatic change tracking
pub struct SliderBuilder<'a, T> {
    value: &'a mut T,
    range: std::ops::RangeInclusive<T>,
    text: String,
    suffix: Option<String>,
}

impl<'a, T> SliderBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T, range: std::ops::RangeInclusive<T>) -> Self {
        Self {
            value,
            range,
            text: String::new(),
            suffix: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut slider =
            egui::Slider::new(self.value, self.range).clamping(egui::SliderClamping::Never);

        if !self.text.is_empty() {
            slider = slider.text(self.text);
        }

        if let Some(suffix) = self.suffix {
            slider = slider.suffix(suffix);
        }

        ui.add(slider).changed()
    }
}

/// Builder for creating drag values with automatic formatting
pub struct DragValueBuilder<'a, T> {
    value: &'a mut T,
    range: Option<std::ops::RangeInclusive<T>>,
    suffix: Option<String>,
    speed: Option<f32>,
}

impl<'a, T> DragValueBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T) -> Self {
        Self {
            value,
            range: None,
            suffix: None,
            speed: None,
        }
    }

    pub fn range(mut self, range: std::ops::RangeInclusive<T>) -> Self {
        self.range = Some(range);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut drag = egui::DragValue::new(self.value);

        if let Some(range) = self.range {
            drag = drag.range(range);
        }

        if let Some(suffix) = self.suffix {
            drag = drag.suffix(suffix);
        }

        if let Some(speed) = self.speed {
            drag = drag.speed(speed);
        }

        ui.add(drag).changed()
    }
}

/// Helper for creating labeled horizontal drag values with range and suffix
pub fn labeled_drag_clamped<T>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    range: std::ops::RangeInclusive<T>,
    suffix: &str,
) -> bool
where
    T: egui::emath::Numeric,
{
    ui.horizontal(|ui| {
        ui.label(label);
        DragValueBuilder::new(value)
            .range(range)
            .suffix(suffix)
            .speed(0.1)
            .show(ui)
    })
    .inner
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomAction {
    In,
    Out,
}

/// Zoom out / percent / zoom in strip
pub struct ZoomControls {
    percent: u32,
    enabled: bool,
}

impl ZoomControls {
    pub fn new(percent: u32, enabled: bool) -> Self {
        Self { percent, enabled }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<ZoomAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.add_enabled(self.enabled, egui::Button::new("➖")).clicked() {
                action = Some(ZoomAction::Out);
            }
            ui.label(format!("{}%", self.percent));
            if ui.add_enabled(self.enabled, egui::Button::new("➕")).clicked() {
                action = Some(ZoomAction::In);
            }
        });
        action
    }
}

/// Page and card dimension editor
pub struct LayoutOptionsEditor<'a> {
    options: &'a mut LayoutOptions,
}

impl<'a> LayoutOptionsEditor<'a> {
    pub fn new(options: &'a mut LayoutOptions) -> Self {
        Self { options }
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        changed |= labeled_drag_clamped(
            ui,
            "Page width:",
            &mut self.options.page_width_mm,
            50.0..=1000.0,
            " mm",
        );
        changed |= labeled_drag_clamped(
            ui,
            "Page height:",
            &mut self.options.page_height_mm,
            50.0..=1000.0,
            " mm",
        );
        changed |= labeled_drag_clamped(
            ui,
            "Card width:",
            &mut self.options.card_width_mm,
            10.0..=300.0,
            " mm",
        );
        changed |= labeled_drag_clamped(
            ui,
            "Card height:",
            &mut self.options.card_height_mm,
            10.0..=300.0,
            " mm",
        );
        changed |= labeled_drag_clamped(ui, "Gap:", &mut self.options.gap_mm, 0.0..=100.0, " mm");

        changed
    }
}
