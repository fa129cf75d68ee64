//! Representative documents.

use super::Script;

/// Head with one of each base, a body exercising every reference kind.
pub fn sample() -> Script {
    sample_body(sample_head(Script::document("sample")))
}

pub fn sample_head(script: Script) -> Script {
    script
        .open("head", &[])
        .open("regionBase", &[("id", "rb")])
        .open("region", &[("id", "screen"), ("width", "100%")])
        .leaf("region", &[("id", "corner"), ("left", "80%"), ("width", "20%")])
        .close_to("regionBase")
        .open("descriptorBase", &[])
        .leaf("descriptor", &[("id", "dVideo"), ("region", "screen")])
        .open("descriptor", &[("id", "dIcon"), ("region", "corner")])
        .leaf("descriptorParam", &[("name", "transparency"), ("value", "0.5")])
        .close_to("descriptorBase")
        .open("connectorBase", &[])
        .open("causalConnector", &[("id", "onBeginStart")])
        .leaf("connectorParam", &[("name", "delay")])
        .leaf("simpleCondition", &[("role", "onBegin")])
        .leaf("simpleAction", &[("role", "start"), ("delay", "$delay")])
        .close()
        .open("causalConnector", &[("id", "onKeySelectionSet")])
        .leaf("connectorParam", &[("name", "keyCode")])
        .leaf("connectorParam", &[("name", "var")])
        .open("compoundCondition", &[("operator", "and")])
        .leaf("simpleCondition", &[("role", "onSelection"), ("key", "$keyCode")])
        .open("assessmentStatement", &[("comparator", "eq")])
        .leaf("attributeAssessment", &[("role", "test"), ("eventType", "attribution")])
        .leaf("valueAssessment", &[("value", "true")])
        .close_to("compoundCondition")
        .open("compoundAction", &[("operator", "seq")])
        .leaf("simpleAction", &[("role", "set"), ("value", "$var")])
        .leaf("simpleAction", &[("role", "stop")])
        .close_to("connectorBase")
        .open("ruleBase", &[])
        .leaf("rule", &[("id", "rEn"), ("var", "system.language"), ("comparator", "eq"), ("value", "en")])
        .open("compositeRule", &[("id", "rAny"), ("operator", "or")])
        .leaf("rule", &[("id", "rPt"), ("var", "system.language"), ("comparator", "eq"), ("value", "pt")])
        .close_to("head")
}

pub fn sample_body(script: Script) -> Script {
    script
        .open("body", &[])
        .leaf("port", &[("id", "entry"), ("component", "video")])
        .open("media", &[("id", "video"), ("src", "video.mp4"), ("descriptor", "dVideo")])
        .leaf("area", &[("id", "credits"), ("begin", "10s")])
        .close()
        .leaf("media", &[("id", "icon"), ("src", "icon.png"), ("descriptor", "dIcon")])
        .open("media", &[("id", "settings"), ("type", "application/x-ginga-settings")])
        .leaf("property", &[("name", "service.currentFocus")])
        .close()
        .open("link", &[("id", "lStart"), ("xconnector", "onBeginStart")])
        .leaf("linkParam", &[("name", "delay"), ("value", "2s")])
        .leaf("bind", &[("role", "onBegin"), ("component", "video"), ("interface", "credits")])
        .leaf("bind", &[("role", "start"), ("component", "icon")])
        .close()
        .open("link", &[("id", "lKey"), ("xconnector", "onKeySelectionSet")])
        .open("bind", &[("role", "onSelection"), ("component", "video")])
        .leaf("bindParam", &[("name", "keyCode"), ("value", "RED")])
        .close()
        .leaf("bind", &[("role", "test"), ("component", "settings"), ("interface", "service.currentFocus")])
        .open("bind", &[("role", "set"), ("component", "settings"), ("interface", "service.currentFocus")])
        .leaf("bindParam", &[("name", "var"), ("value", "$test")])
        .close()
        .leaf("bind", &[("role", "stop"), ("component", "video")])
        .close()
        .open("switch", &[("id", "lang")])
        .leaf("bindRule", &[("constituent", "subEn"), ("rule", "rEn")])
        .leaf("defaultComponent", &[("component", "subPt")])
        .leaf("media", &[("id", "subEn"), ("src", "en.srt")])
        .leaf("media", &[("id", "subPt"), ("src", "pt.srt")])
        .close()
        .open("context", &[("id", "extras")])
        .leaf("port", &[("id", "extrasEntry"), ("component", "langCopy")])
        .leaf("switch", &[("id", "langCopy"), ("refer", "lang")])
        .close_to("body")
}

/// A small document as markup text.
pub const SAMPLE_MARKUP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncl id="markup" xmlns="http://www.ncl.org.br/NCL3.0/EDTVProfile">
  <head>
    <regionBase>
      <region id="screen" width="100%" height="100%"/>
    </regionBase>
    <descriptorBase>
      <descriptor id="dVideo" region="screen"/>
    </descriptorBase>
    <connectorBase>
      <causalConnector id="onBeginStart">
        <simpleCondition role="onBegin"/>
        <simpleAction role="start"/>
      </causalConnector>
    </connectorBase>
  </head>
  <body>
    <!-- entry point -->
    <port id="entry" component="video"/>
    <media id="video" src="media/video.mp4" descriptor="dVideo">
      <area id="credits" begin="10s"/>
    </media>
    <media id="icon" src="media/icon.png"/>
    <link xconnector="onBeginStart">
      <bind role="onBegin" component="video" interface="credits"/>
      <bind role="start" component="icon"/>
    </link>
  </body>
</ncl>
"#;
