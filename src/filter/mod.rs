use crate::color::Rgb;

mod brightness;

pub(crate) trait Filter {
    /// Apply the filter to a frame on its way to the strip
    fn apply(&self, frame: &mut [Rgb]);

    /// Whether applying the filter would leave the frame untouched
    fn is_identity(&self) -> bool {
        false
    }
}

pub use brightness::BrightnessFilter;
