/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use batchwarp_ops::layout::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Position of the channel axis within a rank-3 image.
///
/// The two variants are the only layouts the operator accepts; anything else
/// is unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLayout {
    /// Channel axis first (CHW): one contiguous plane per channel.
    ChannelFirst,
    /// Channel axis last (HWC): channels interleaved within each pixel.
    ChannelLast,
}

impl ImageLayout {
    /// Index of the channel axis in a rank-3 shape.
    pub const fn channel_axis(&self) -> usize {
        match self {
            ImageLayout::ChannelFirst => 0,
            ImageLayout::ChannelLast => 2,
        }
    }

    /// True when every pixel carries its channels adjacently in memory.
    pub const fn is_interleaved(&self) -> bool {
        matches!(self, ImageLayout::ChannelLast)
    }

    /// Splits a rank-3 shape into (height, width, channels) extents.
    ///
    /// The shape must have exactly three axes; callers validate the rank
    /// before resolving extents.
    pub fn dims(&self, shape: &[usize]) -> (usize, usize, usize) {
        match self {
            ImageLayout::ChannelFirst => (shape[1], shape[2], shape[0]),
            ImageLayout::ChannelLast => (shape[0], shape[1], shape[2]),
        }
    }

    /// The output shape for this layout with the given extents.
    pub fn output_shape(&self, size: ImageSize, channels: usize) -> [usize; 3] {
        match self {
            ImageLayout::ChannelFirst => [channels, size.height, size.width],
            ImageLayout::ChannelLast => [size.height, size.width, channels],
        }
    }
}
