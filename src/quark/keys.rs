macro_rules! well_known_keys {
    ($($name:ident => $bytes:literal,)*) => {
        /// Keys that are pre-seeded into every [`QuarkTable`](super::QuarkTable).
        ///
        /// The discriminant of each key is its quark ID. The list is sorted by
        /// key bytes and only ever grows at the end of a release, so the IDs
        /// are stable across runs.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum Key {
            $($name,)*
        }

        pub(super) const WELL_KNOWN: &[&[u8]] = &[$($bytes,)*];
    };
}

well_known_keys! {
    Empty => b"",
    ActiveTorrentCount => b"activeTorrentCount",
    ActivityDate => b"activity-date",
    Added => b"added",
    AddedDate => b"added-date",
    Address => b"address",
    Announce => b"announce",
    AnnounceList => b"announce-list",
    Arguments => b"arguments",
    Comment => b"comment",
    Complete => b"complete",
    CreatedBy => b"created by",
    CreationDate => b"creation date",
    DhtEnabled => b"dht-enabled",
    DownloadDir => b"download-dir",
    Downloaded => b"downloaded",
    DownloadedBytes => b"downloadedBytes",
    Encoding => b"encoding",
    Error => b"error",
    ErrorString => b"errorString",
    Eta => b"eta",
    FailureReason => b"failure reason",
    Fields => b"fields",
    Files => b"files",
    HashString => b"hashString",
    Id => b"id",
    Ids => b"ids",
    Incomplete => b"incomplete",
    Info => b"info",
    InfoHash => b"info_hash",
    Interval => b"interval",
    Labels => b"labels",
    LeftUntilDone => b"leftUntilDone",
    Length => b"length",
    LpdEnabled => b"lpd-enabled",
    M => b"m",
    MaxPeers => b"max-peers",
    MetadataSize => b"metadata_size",
    Method => b"method",
    MinInterval => b"min interval",
    MsgType => b"msg_type",
    Name => b"name",
    Nodes => b"nodes",
    P => b"p",
    Path => b"path",
    PeerId => b"peer id",
    Peers => b"peers",
    Peers6 => b"peers6",
    PercentDone => b"percentDone",
    PexEnabled => b"pex-enabled",
    Piece => b"piece",
    PieceLength => b"piece length",
    Pieces => b"pieces",
    Port => b"port",
    Private => b"private",
    RateDownload => b"rateDownload",
    RateUpload => b"rateUpload",
    Reqq => b"reqq",
    Result => b"result",
    SessionId => b"session-id",
    SizeWhenDone => b"sizeWhenDone",
    Source => b"source",
    SpeedLimitDown => b"speed-limit-down",
    SpeedLimitUp => b"speed-limit-up",
    Status => b"status",
    Tag => b"tag",
    Torrents => b"torrents",
    TotalSize => b"total_size",
    TrackerId => b"tracker id",
    Trackers => b"trackers",
    Uploaded => b"uploaded",
    UploadedBytes => b"uploadedBytes",
    UrlList => b"url-list",
    UtMetadata => b"ut_metadata",
    UtPex => b"ut_pex",
    V => b"v",
    Version => b"version",
    WarningMessage => b"warning message",
    Webseeds => b"webseeds",
    Yourip => b"yourip",
}

impl Key {
    pub fn as_bytes(self) -> &'static [u8] {
        WELL_KNOWN[self as usize]
    }
}
