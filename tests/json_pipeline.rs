use transform_chain::{
    Pipeline, PipelineDocument, Resource,
    ops::{
        Align, AspectMode, Crop, Flip, Output, OutputFormat, Resize, ResizeFit, Rotate,
        StorageAccess, StorageLocation, VideoConvert, Watermark,
    },
};

#[test]
fn video_fixture_matches_typed_builder() {
    let loaded = Pipeline::from_json_str(include_str!("data/video_pipeline.json")).unwrap();

    let mut vc = VideoConvert::new();
    vc.preset("h264")
        .width(1280)
        .height(720)
        .aspect_mode(AspectMode::Letterbox)
        .fps(30)
        .unwrap()
        .audio_channels(2)
        .unwrap()
        .audio_sample_rate(44100)
        .unwrap()
        .location(StorageLocation::S3)
        .access(StorageAccess::Private)
        .path("renders/intro.mp4")
        .watermark_url(Resource::url("https://example.com/logo.png").unwrap())
        .watermark_top(10)
        .unwrap()
        .watermark_right(10)
        .unwrap();
    let mut built = Pipeline::new();
    built.append(vc);

    assert_eq!(loaded.render(), built.render());
    assert_eq!(loaded.fingerprint(), built.fingerprint());
    assert_eq!(
        loaded.render(),
        "video_convert=preset:h264,width:1280,height:720,aspect_mode:letterbox,fps:30,\
         audio_channels:2,audio_samplerate:44100,location:s3,access:private,\
         path:renders%2Fintro.mp4,watermark_url:https%3A%2F%2Fexample.com%2Flogo.png,\
         watermark_top:10,watermark_right:10"
    );
}

#[test]
fn image_fixture_matches_typed_builder() {
    let f = std::fs::File::open(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/image_pipeline.json"
    ))
    .unwrap();
    let loaded = Pipeline::from_reader(std::io::BufReader::new(f)).unwrap();

    let mut crop = Crop::new();
    crop.dim([20, 20, 640, 480]).unwrap();
    let mut resize = Resize::new();
    resize
        .width(320)
        .unwrap()
        .fit(ResizeFit::Crop)
        .align(Align::Faces);
    let mut rotate = Rotate::new();
    rotate.deg(90).unwrap().exif(false);
    let mut wm = Watermark::new();
    wm.file(Resource::handle("KW9EJhYtS6y48Whm2S6D").unwrap())
        .size(30)
        .unwrap()
        .position(&[Align::Bottom, Align::Right])
        .unwrap();
    let mut out = Output::new();
    out.format(OutputFormat::Webp).quality(80).unwrap();

    let mut built = Pipeline::new();
    built
        .append(crop)
        .append(resize)
        .append(rotate)
        .append(wm)
        .append(Flip::new())
        .append(out);

    assert_eq!(loaded, built);
    assert_eq!(
        loaded.render(),
        "crop=dim:[20,20,640,480]/resize=width:320,fit:crop,align:faces/rotate=deg:90,exif:false/\
         watermark=file:KW9EJhYtS6y48Whm2S6D,size:30,position:[bottom,right]/flip/\
         output=format:webp,quality:80"
    );
}

#[test]
fn document_written_from_a_pipeline_loads_back() {
    let loaded = Pipeline::from_json_str(include_str!("data/image_pipeline.json")).unwrap();
    let json = loaded.to_document().to_json_pretty().unwrap();
    let again = PipelineDocument::from_json_str(&json)
        .unwrap()
        .into_pipeline()
        .unwrap();
    assert_eq!(again.render(), loaded.render());
    assert_eq!(again.fingerprint(), loaded.fingerprint());
}

#[test]
fn type_mismatch_in_document_is_reported() {
    let err = Pipeline::from_json_str(
        r#"{ "steps": [ { "op": "video_convert", "options": { "force": "yes" } } ] }"#,
    )
    .unwrap_err();
    assert_eq!(err.option(), Some("force"));
    assert!(err.to_string().contains("expects a boolean"));
}
