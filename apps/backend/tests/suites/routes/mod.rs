pub mod items;
pub mod validated_json;
