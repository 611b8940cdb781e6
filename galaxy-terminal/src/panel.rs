/// Keyboard-driven parameter panel
use galaxy_core::GenerationParameters;

/// A tweakable generation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tweak {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
}

/// Slider bounds and increment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Tweak {
    pub const ALL: [Tweak; 7] = [
        Tweak::Count,
        Tweak::Size,
        Tweak::Radius,
        Tweak::Branches,
        Tweak::Spin,
        Tweak::Randomness,
        Tweak::RandomnessPower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tweak::Count => "count",
            Tweak::Size => "size",
            Tweak::Radius => "radius",
            Tweak::Branches => "branches",
            Tweak::Spin => "spin",
            Tweak::Randomness => "randomness",
            Tweak::RandomnessPower => "randomness power",
        }
    }

    pub fn range(self) -> Range {
        let (min, max, step) = match self {
            Tweak::Count => (100.0, 1_000_000.0, 100.0),
            Tweak::Size => (0.001, 0.1, 0.001),
            Tweak::Radius => (0.01, 20.0, 0.01),
            Tweak::Branches => (2.0, 20.0, 1.0),
            Tweak::Spin => (-5.0, 5.0, 0.1),
            Tweak::Randomness => (0.0, 2.0, 0.01),
            Tweak::RandomnessPower => (1.0, 10.0, 0.1),
        };
        Range { min, max, step }
    }

    pub fn get(self, params: &GenerationParameters) -> f64 {
        match self {
            Tweak::Count => params.count as f64,
            Tweak::Size => params.size as f64,
            Tweak::Radius => params.radius as f64,
            Tweak::Branches => params.branches as f64,
            Tweak::Spin => params.spin as f64,
            Tweak::Randomness => params.randomness as f64,
            Tweak::RandomnessPower => params.randomness_power as f64,
        }
    }

    fn set(self, params: &mut GenerationParameters, value: f64) {
        match self {
            Tweak::Count => params.count = value as usize,
            Tweak::Size => params.size = value as f32,
            Tweak::Radius => params.radius = value as f32,
            Tweak::Branches => params.branches = value as u32,
            Tweak::Spin => params.spin = value as f32,
            Tweak::Randomness => params.randomness = value as f32,
            Tweak::RandomnessPower => params.randomness_power = value as f32,
        }
    }

    fn format(self, value: f64) -> String {
        match self {
            Tweak::Count | Tweak::Branches => format!("{}", value as u64),
            Tweak::Size => format!("{:.3}", value),
            _ => format!("{:.2}", value),
        }
    }
}

/// Selection state for the panel overlay
#[derive(Debug, Default)]
pub struct ParameterPanel {
    selected: usize,
}

impl ParameterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Tweak {
        Tweak::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Tweak::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Tweak::ALL.len() - 1) % Tweak::ALL.len();
    }

    /// Move the selected parameter by `steps` increments, snapped to the
    /// step grid and clamped to the slider range. Returns whether the value
    /// changed, i.e. whether the galaxy needs regenerating.
    pub fn adjust(&self, params: &mut GenerationParameters, steps: i32) -> bool {
        let tweak = self.selected();
        let Range { min, max, step } = tweak.range();
        let current = tweak.get(params);
        let next = ((current / step).round() + steps as f64) * step;
        let next = next.clamp(min, max);

        if (next - current).abs() < step * 0.5 {
            return false;
        }
        tweak.set(params, next);
        true
    }

    /// Overlay lines, the selected entry marked with `>`
    pub fn lines(&self, params: &GenerationParameters) -> Vec<String> {
        Tweak::ALL
            .iter()
            .enumerate()
            .map(|(i, tweak)| {
                let marker = if i == self.selected { '>' } else { ' ' };
                format!("{} {:<17}{}", marker, tweak.label(), tweak.format(tweak.get(params)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut panel = ParameterPanel::new();
        assert_eq!(panel.selected(), Tweak::Count);
        panel.select_prev();
        assert_eq!(panel.selected(), Tweak::RandomnessPower);
        panel.select_next();
        panel.select_next();
        assert_eq!(panel.selected(), Tweak::Size);
    }

    #[test]
    fn test_adjust_steps_and_clamps() {
        let mut params = GenerationParameters::default();
        let mut panel = ParameterPanel::new();

        assert!(panel.adjust(&mut params, 3));
        assert_eq!(params.count, 100_300);

        // branches
        panel.select_next();
        panel.select_next();
        panel.select_next();
        assert!(panel.adjust(&mut params, -10));
        assert_eq!(params.branches, 2);
        assert!(!panel.adjust(&mut params, -1), "already at the minimum");
    }

    #[test]
    fn test_adjust_spin_can_go_negative() {
        let mut params = GenerationParameters::default().with_spin(0.0);
        let mut panel = ParameterPanel::new();
        while panel.selected() != Tweak::Spin {
            panel.select_next();
        }
        assert!(panel.adjust(&mut params, -12));
        assert!((params.spin + 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_lines_mark_selection() {
        let panel = ParameterPanel::new();
        let lines = panel.lines(&GenerationParameters::default());
        assert_eq!(lines.len(), Tweak::ALL.len());
        assert!(lines[0].starts_with("> count"));
        assert!(lines[0].ends_with("100000"));
        assert!(lines[3].starts_with("  branches"));
    }
}
