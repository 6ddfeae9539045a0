use crate::value::wire_enum;

wire_enum! {
    /// Storage backend that receives the generated file.
    pub enum StorageLocation {
        S3 => "s3",
        Dropbox => "dropbox",
        Rackspace => "rackspace",
        Azure => "azure",
        Gcs => "gcs",
    }
}

wire_enum! {
    /// Access level of the stored file.
    pub enum StorageAccess {
        Public => "public",
        Private => "private",
    }
}

wire_enum! {
    /// How the output frame handles a source with a different aspect ratio.
    pub enum AspectMode {
        /// Keep the original size and aspect ratio.
        Preserve => "preserve",
        /// Shrink to fit inside the target while keeping the aspect ratio.
        Constrain => "constrain",
        /// Fit inside the target and fill the remainder with black bars.
        Letterbox => "letterbox",
        /// Fit inside the target and pad the remainder.
        Pad => "pad",
        /// Fill the target and crop whatever overflows.
        Crop => "crop",
    }
}

wire_enum! {
    pub enum ResizeFit {
        Clip => "clip",
        Crop => "crop",
        Scale => "scale",
        Max => "max",
    }
}

wire_enum! {
    /// Anchor used by resize cropping and watermark placement.
    pub enum Align {
        Center => "center",
        Top => "top",
        Middle => "middle",
        Bottom => "bottom",
        Left => "left",
        Right => "right",
        Faces => "faces",
    }
}

wire_enum! {
    pub enum OutputFormat {
        Jpg => "jpg",
        Png => "png",
        Webp => "webp",
        Gif => "gif",
        Tiff => "tiff",
        Pdf => "pdf",
    }
}
