//! Known-answer test vectors for every supported curve.
//!
//! All signatures are over [`SAMPLE_HASH`], the SHA-256 digest of the ASCII
//! string `"sample"`. Values are big-endian and [`CurveParams::field_bytes`]
//! long.
//!
//! For secp192r1, secp224r1, secp256r1 and secp384r1 the secret key, public
//! key and deterministic signature are those of [RFC 6979] appendices A.2.3
//! to A.2.6 (SHA-256, message `"sample"`). All other values, including every
//! secp160r1 and secp256k1 value, were computed with a textbook affine
//! double-and-add model over Python integers that shares no code with this
//! crate. Its RFC 6979 nonces reproduce the published signatures above.
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979
//! [`CurveParams::field_bytes`]: crate::CurveParams::field_bytes

use hex_literal::hex;

/// SHA-256 of `"sample"`.
pub const SAMPLE_HASH: [u8; 32] =
    hex!("AF2BDBE1AA9B6EC1E2ADE1D694F41FC71A831D0268E9891562113D8A62ADD1BF");

/// Key pair, signature and Diffie-Hellman values for one curve.
#[derive(Clone, Copy, Debug)]
pub struct TestVector {
    /// SECG curve name.
    pub curve: &'static str,
    /// Secret key `d`.
    pub secret: &'static [u8],
    /// Public key `d · G` as `x ‖ y`.
    pub public: &'static [u8],
    /// Nonce used for [`TestVector::signature`].
    pub nonce: &'static [u8],
    /// `r ‖ s` signed with `nonce`.
    pub signature: &'static [u8],
    /// `r ‖ s` with the RFC 6979 nonce for HMAC-SHA-256.
    pub deterministic_signature: &'static [u8],
    /// A second secret key, the Diffie-Hellman peer of `secret`.
    pub peer_secret: &'static [u8],
    /// `x` coordinate of `secret · peer_secret · G`.
    pub shared_secret: &'static [u8],
}

/// secp160r1
pub const SECP160R1: TestVector = TestVector {
    curve: "secp160r1",
    secret: &hex!("88C3A2122ED6E3444C62741595ED735B942D0C03"),
    public: &hex!(
        "83A4DBFE4DA7809BE97752F6474D151E4E6F11DB"
        "C8C78E4EEECD12F2A3D159946B07CE9D9E719FD9"
    ),
    nonce: &hex!("09DB7318D904CD17CB8C0D5B80A93FCE9D32571C"),
    signature: &hex!(
        "4445A02E0B1A0857F80632FAD7BF18A6B6CBFFFD"
        "2C7832A1DBBE9EECA547E6C43F1DD77167305868"
    ),
    deterministic_signature: &hex!(
        "2A003AEF533185C583FF8F9A1BC3AB6025607B50"
        "D798674CA12C1DDAC920C261288EAE92A775E31F"
    ),
    peer_secret: &hex!("29252B1683F713261BA7F267BFEC4BBD85BFDF67"),
    shared_secret: &hex!("6FF57CC7949CA8AE07FC0C04EB59C3E7687DD604"),
};

/// secp192r1
pub const SECP192R1: TestVector = TestVector {
    curve: "secp192r1",
    secret: &hex!("6FAB034934E4C0FC9AE67F5B5659A9D7D1FEFD187EE09FD4"),
    public: &hex!(
        "AC2C77F529F91689FEA0EA5EFEC7F210D8EEA0B9E047ED56"
        "3BC723E57670BD4887EBC732C523063D0A7C957BC97C1C43"
    ),
    nonce: &hex!("AC1F81D590462B293FDD465DD7F5FB64CA19A231D6EF2838"),
    signature: &hex!(
        "7946CB8AAB37E059C1F4A9DEDF83644B7376D66781216162"
        "05045B4C5E9287ABA3FFAC587A4E2DE1DD979658AC16AE01"
    ),
    deterministic_signature: &hex!(
        "4B0B8CE98A92866A2820E20AA6B75B56382E0F9BFD5ECB55"
        "CCDB006926EA9565CBADC840829D8C384E06DE1F1E381B85"
    ),
    peer_secret: &hex!("CC45E80E7F2DA0ECEC4383EFA652B1A6AC9F7BFF1D629577"),
    shared_secret: &hex!("E6FE57F41A506E941A0471BDAF2899A8295A7E3F6A3798C4"),
};

/// secp224r1
pub const SECP224R1: TestVector = TestVector {
    curve: "secp224r1",
    secret: &hex!("F220266E1105BFE3083E03EC7A3A654651F45E37167E88600BF257C1"),
    public: &hex!(
        "00CF08DA5AD719E42707FA431292DEA11244D64FC51610D94B130D6C"
        "EEAB6F3DEBE455E3DBF85416F7030CBD94F34F2D6F232C69F3C1385A"
    ),
    nonce: &hex!("3A0C895F855BF78A87DCCFA7A5298453C5E078E23D5DC727DF92BA9C"),
    signature: &hex!(
        "906FD3AFFF378B09099F89B7BA466961E17A5A3D5C15C701BE443187"
        "2C30A7D22BDF6CE7F69BCB8ECE18EA302F2BACE5435334278D50F619"
    ),
    deterministic_signature: &hex!(
        "61AA3DA010E8E8406C656BC477A7A7189895E7E840CDFE8FF42307BA"
        "BC814050DAB5D23770879494F9E0A680DC1AF7161991BDE692B10101"
    ),
    peer_secret: &hex!("57CE8C5CE87C89064D1FFA56A2EE7952ADF30879DAF5CA61F438991E"),
    shared_secret: &hex!("DB4A6A23B7F2701FDF9DB00A07F9FB6E34A0AC36AABE0203FF2498E7"),
};

/// secp256r1
pub const SECP256R1: TestVector = TestVector {
    curve: "secp256r1",
    secret: &hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"),
    public: &hex!(
        "60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6"
        "7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299"
    ),
    nonce: &hex!("BAE33516FC9619A4588DBE741A4602D324D6C6FA710F6AB7325A250246C70656"),
    signature: &hex!(
        "06A68F56CED7FDEC3EE932EE4A0C037F5DED99C5CBB0EB0CD0F72B12A183DE05"
        "AE28A6D49221D56A87AEFBE838C2CC89C1A7F9ECF62A7D38208458B0765B0006"
    ),
    deterministic_signature: &hex!(
        "EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716"
        "F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8"
    ),
    peer_secret: &hex!("5968E17C796EA5858C227261B2D148FCB2C2126174057B200F3FA24B27288C32"),
    shared_secret: &hex!("2ECCD39307D915568D3003FDBDA445522EEC2184A1087FFF002AA8B47C3D998B"),
};

/// secp256k1
pub const SECP256K1: TestVector = TestVector {
    curve: "secp256k1",
    secret: &hex!("9F947F767FB9B7DDBBBF08E80DD99D2D2846B672A4FC0AEF43D788B7E5B28BEB"),
    public: &hex!(
        "61A7F3A31D96DCEDB7831568296CDFB80C2E3CBEB9942AA06DEB89DD1FB4EF76"
        "9F0535E6121C409D24C76C6F4CFE635038448C5D6EDD9B040E921B819A93D552"
    ),
    nonce: &hex!("355430DDEC4CB2B3467E4B24EE116DE527ED91551FE980E98BD2AD44EBE1B3CA"),
    signature: &hex!(
        "BFF100FC8905C4DB13BEF99143BA9E6C951F09FD644956807700DFB9C260C1F1"
        "4BA6E7E6F7D542A8EECF56B3CCB64061F17F3468E4EA05C4EAA2B3669E24DAE0"
    ),
    deterministic_signature: &hex!(
        "D7FF357E857972A4AF7F7E49150074EF70CDBC2E770A538CDC45DFB6542E2D5A"
        "7333B6370B7078930E9ECC5ECA2D1B340B5A3D5457EAD8665D1E8C88D57B358A"
    ),
    peer_secret: &hex!("0A8D2D5FD4E54E803029A7CDA201F208F0BB871E87433F699737DFB8B3832627"),
    shared_secret: &hex!("41087E8B4C3B3E25B81DAAECE89478661F86F952AC4FD39A7EFA765FB122EA6D"),
};

/// secp384r1
pub const SECP384R1: TestVector = TestVector {
    curve: "secp384r1",
    secret: &hex!(
        "6B9D3DAD2E1B8C1C05B19875B6659F4DE23C3B667BF297BA"
        "9AA47740787137D896D5724E4C70A825F872C9EA60D2EDF5"
    ),
    public: &hex!(
        "EC3A4E415B4E19A4568618029F427FA5DA9A8BC4AE92E02E"
        "06AAE5286B300C64DEF8F0EA9055866064A254515480BC13"
        "8015D9B72D7D57244EA8EF9AC0C621896708A59367F9DFB9"
        "F54CA84B3F1C9DB1288B231C3AE0D4FE7344FD2533264720"
    ),
    nonce: &hex!(
        "31B7AD2A9583DA773505904135D687D6FCA23450A2398342"
        "46EA1D1460F56B6260C47B755D971E3DE40B9E8006179AB8"
    ),
    signature: &hex!(
        "674CF1DD4CB5FFAF20848D78D7C70D4FCE092FCA4A63DDB0"
        "EEABB97D114AE0ACEF22C207F73D96F7F5528215DF7D6FE3"
        "2E44A15C3FE00BEFB167AADF679C60DC4EDE6A5E0F67F24B"
        "2F92157CA856F475E7A95329006B742D0EC558DE65B2B86B"
    ),
    deterministic_signature: &hex!(
        "21B13D1E013C7FA1392D03C5F99AF8B30C570C6F98D4EA8E"
        "354B63A21D3DAA33BDE1E888E63355D92FA2B3C36D8FB2CD"
        "F3AA443FB107745BF4BD77CB3891674632068A10CA67E3D4"
        "5DB2266FA7D1FEEBEFDC63ECCD1AC42EC0CB8668A4FA0AB0"
    ),
    peer_secret: &hex!(
        "D78F4EE59A903DFDD7AA2DF9A008E89754465580A3FDA182"
        "B286498834ED67B8246517F4C72723051364D10096873907"
    ),
    shared_secret: &hex!(
        "D8AB348139F69ADEEBA8C5944610E5EB026CEDAD026466D8"
        "8AEC7391422307DFC7793A5D9FE626B083F6C3E25D8FE98A"
    ),
};
