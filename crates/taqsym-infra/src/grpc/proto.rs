//! Protobuf messages and service stubs generated from `proto/`.

pub mod auth {
    tonic::include_proto!("auth");
}

pub mod task {
    tonic::include_proto!("task");
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_task_wire_layout() {
        let msg = task::CreateTaskRequest {
            title: "t".to_string(),
            description: String::new(),
            user_id: 3,
        };
        // field 1 (len-delimited) "t", field 3 (varint) 3; empty field 2 omitted
        assert_eq!(msg.encode_to_vec(), vec![0x0a, 0x01, b't', 0x18, 0x03]);
    }
}
