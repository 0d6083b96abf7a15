//! File descriptor set for the recommendation proto, built programmatically.
//!
//! Generated code is checked in rather than produced by a build script, so
//! there is no `protoc` descriptor blob to embed. The reflection service
//! only needs a `FileDescriptorSet`; this module reconstructs the one that
//! `proto/recommendation/v1/video_recommendation.proto` describes.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    MethodDescriptorProto, ServiceDescriptorProto,
};

fn string_field(name: &str, number: i32, json_name: &str, repeated: bool) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(if repeated {
            Label::Repeated as i32
        } else {
            Label::Optional as i32
        }),
        r#type: Some(Type::String as i32),
        json_name: Some(json_name.to_string()),
        ..Default::default()
    }
}

/// Descriptor set covering `recommendation.v1.VideoRecommendation`.
pub fn file_descriptor_set() -> FileDescriptorSet {
    let request = DescriptorProto {
        name: Some("RecommendationRequest".to_string()),
        field: vec![
            string_field("viewer_id", 1, "viewerId", false),
            string_field("watch_history", 2, "watchHistory", true),
            string_field("successful_plays", 3, "successfulPlays", true),
        ],
        ..Default::default()
    };

    let response = DescriptorProto {
        name: Some("RecommendationResponse".to_string()),
        field: vec![string_field("video_ids", 1, "videoIds", true)],
        ..Default::default()
    };

    let service = ServiceDescriptorProto {
        name: Some("VideoRecommendation".to_string()),
        method: vec![MethodDescriptorProto {
            name: Some("GetRecommendations".to_string()),
            input_type: Some(".recommendation.v1.RecommendationRequest".to_string()),
            output_type: Some(".recommendation.v1.RecommendationResponse".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    FileDescriptorSet {
        file: vec![FileDescriptorProto {
            name: Some("recommendation/v1/video_recommendation.proto".to_string()),
            package: Some("recommendation.v1".to_string()),
            message_type: vec![request, response],
            service: vec![service],
            syntax: Some("proto3".to_string()),
            ..Default::default()
        }],
    }
}
