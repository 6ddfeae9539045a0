use super::enums::{Align, OutputFormat, ResizeFit};

operation! {
    /// Resizes an image. Either dimension may be omitted to keep the aspect ratio.
    pub struct Resize => "resize" {
        width("width"): range(1, 10000);
        height("height"): range(1, 10000);
        fit("fit"): choice(ResizeFit);
        /// Anchor kept in frame when `fit` crops.
        align("align"): choice(Align);
    }
}

operation! {
    pub struct Crop => "crop" {
        /// `[x, y, width, height]` in source pixels.
        dim("dim"): ints(4, 0, 100000);
    }
}

operation! {
    pub struct Rotate => "rotate" {
        /// Clockwise rotation in degrees.
        deg("deg"): range(0, 359);
        /// Honour (`true`) or reset the EXIF orientation flag.
        exif("exif"): bool;
        /// Fill colour of the uncovered corners, e.g. `white` or `FF0000`.
        background("background"): text;
    }
}

operation! {
    /// Mirrors the image vertically.
    pub struct Flip => "flip" {}
}

operation! {
    /// Mirrors the image horizontally.
    pub struct Flop => "flop" {}
}

operation! {
    /// Overlays another stored image.
    pub struct Watermark => "watermark" {
        file("file"): resource;
        /// Watermark size as a percentage of the base image.
        size("size"): range(1, 500);
        /// Vertical and/or horizontal anchor, e.g. `[top, right]`.
        position("position"): choices(Align, 1, 2);
    }
}

operation! {
    /// Converts the result to another file format.
    pub struct Output => "output" {
        format("format"): choice(OutputFormat);
        quality("quality"): range(1, 100);
        compress("compress"): bool;
        density("density"): range(1, 500);
        secure("secure"): bool;
    }
}
