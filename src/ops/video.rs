use super::enums::{AspectMode, StorageAccess, StorageLocation};

operation! {
    /// Converts a video or audio file to another format, resolution, sample rate, etc.
    ///
    /// ```
    /// use transform_chain::ops::VideoConvert;
    ///
    /// let mut convert = VideoConvert::new();
    /// convert.width(640).force(true).fps(30)?;
    /// assert_eq!(convert.render(), "video_convert=width:640,force:true,fps:30");
    /// # Ok::<(), transform_chain::TransformError>(())
    /// ```
    pub struct VideoConvert => "video_convert" {
        /// Target format preset, e.g. `h264`, `webm`, `mp3`.
        preset("preset"): text;
        /// Restart a completed or failed conversion instead of serving the cached result.
        force("force"): bool;
        /// Output width in pixels.
        width("width"): int;
        /// Output height in pixels.
        height("height"): int;
        /// Title written to the file metadata.
        title("title"): text;
        /// File extension of the generated file.
        extname("extname"): text;
        /// File name of the generated file.
        filename("filename"): text;
        location("location"): choice(StorageLocation);
        /// Path (for S3: the key) the file is stored at.
        path("path"): text;
        access("access"): choice(StorageAccess);
        /// Bucket or container the file ends up in.
        container("container"): text;
        /// Upscale to the preset resolution. Service default: `true`.
        upscale("upscale"): bool;
        aspect_mode("aspect_mode"): choice(AspectMode);
        /// Encode in two passes for better quality. Service default: `false`.
        two_pass("two_pass"): bool;
        /// Video bitrate.
        video_bitrate("video_bitrate"): range(1, 5000);
        /// Frames per second; omitted means the source frame rate.
        fps("fps"): range(1, 300);
        /// Insert a key frame every `n` frames. Service default: `250`.
        keyframe_interval("keyframe_interval"): int;
        audio_bitrate("audio_bitrate"): range(0, 999);
        /// Audio sample rate. Service default: `44100`.
        audio_sample_rate("audio_samplerate"): range(0, 99999);
        /// Audio channel count; omitted means the source channel count.
        audio_channels("audio_channels"): range(1, 12);
        /// Clip length as `HH:MM:SS`.
        clip_length("clip_length"): text;
        /// Clip start as `HH:MM:SS`, e.g. `00:00:10` starts ten seconds in.
        clip_offset("clip_offset"): text;
        /// Image (URL or handle) overlaid as a watermark.
        watermark_url("watermark_url"): resource;
        watermark_top("watermark_top"): range(0, 9999);
        watermark_bottom("watermark_bottom"): range(0, 9999);
        watermark_left("watermark_left"): range(0, 9999);
        watermark_right("watermark_right"): range(0, 9999);
        watermark_width("watermark_width"): int;
        watermark_height("watermark_height"): int;
    }
}
