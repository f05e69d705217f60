use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct PingResponse {
    pub ok: bool,
}
