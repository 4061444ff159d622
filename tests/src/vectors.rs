//! Published test vectors

/// secp256k1 with `d = 1` over the message "Satoshi Nakamoto", RFC 6979
/// nonce and low-S normalization.
pub mod satoshi {
    pub const MESSAGE: &[u8] = b"Satoshi Nakamoto";
    pub const R: &str = "934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8";
    pub const S: &str = "2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5";
    pub const DER: &str = "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8\
                           02202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5";
}

/// SHA-256 digests from FIPS 180-2.
pub mod sha256 {
    pub const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    pub const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
}

/// The demonstration scenario: the first message verifies, the second must not.
pub const HELLO: &str = "Hello, ECDSA digital signature!";
pub const HELLO_TAMPERED: &str = "Hello, ECDSA digital signature?";
